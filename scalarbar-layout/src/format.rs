//! printf-style number formatting for tick labels.
//!
//! Supports conversions of the form `%[flags][width][.precision][length]conv`
//! with flags `-+ #0`, conversions `d i u f F e E g G` and `%%` escapes. Text
//! around the conversions is copied verbatim. Length modifiers are accepted and
//! ignored since every value is formatted as a double.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CONVERSION_RE: Regex =
        Regex::new(r"%([-+ #0]*)(\d+)?(?:\.(\d*))?(?:hh|h|ll|l|L|q|j|z|t)?([diufFeEgG%])")
            .unwrap();
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Literal(String),
    Conversion(ConversionSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct ConversionSpec {
    left_justify: bool,
    plus_sign: bool,
    space_sign: bool,
    alternate: bool,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
    conversion: char,
}

/// A parsed printf-style format for a single `f64`
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFormat {
    pieces: Vec<Piece>,
}

impl LabelFormat {
    pub fn parse(pattern: &str) -> Self {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut last = 0;
        for caps in CONVERSION_RE.captures_iter(pattern) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            literal.push_str(&pattern[last..whole.start()]);
            last = whole.end();

            let conversion = caps
                .get(4)
                .and_then(|m| m.as_str().chars().next())
                .unwrap_or('g');
            if conversion == '%' {
                literal.push('%');
                continue;
            }
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }

            let flags = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            pieces.push(Piece::Conversion(ConversionSpec {
                left_justify: flags.contains('-'),
                plus_sign: flags.contains('+'),
                space_sign: flags.contains(' '),
                alternate: flags.contains('#'),
                zero_pad: flags.contains('0'),
                width: caps
                    .get(2)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(0),
                // "%.f" means a precision of zero
                precision: caps
                    .get(3)
                    .map(|m| m.as_str().parse().unwrap_or(0)),
                conversion,
            }));
        }
        literal.push_str(&pattern[last..]);
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        Self { pieces }
    }

    pub fn format(&self, value: f64) -> String {
        self.pieces
            .iter()
            .map(|piece| match piece {
                Piece::Literal(s) => s.clone(),
                Piece::Conversion(spec) => spec.format(value),
            })
            .collect()
    }
}

/// Format `value` with a printf-style `pattern`
pub fn format_value(pattern: &str, value: f64) -> String {
    LabelFormat::parse(pattern).format(value)
}

impl ConversionSpec {
    fn format(&self, value: f64) -> String {
        let upper = self.conversion.is_ascii_uppercase();
        let negative = value.is_sign_negative() && !(value == 0.0 && self.is_integer());
        let magnitude = value.abs();

        let body = if !value.is_finite() {
            let s = if value.is_nan() { "nan" } else { "inf" };
            if upper {
                s.to_uppercase()
            } else {
                s.to_string()
            }
        } else {
            match self.conversion {
                'd' | 'i' | 'u' => self.format_integer(magnitude),
                'f' | 'F' => self.format_fixed(magnitude, self.precision.unwrap_or(6)),
                'e' | 'E' => self.format_exponential(magnitude, self.precision.unwrap_or(6), upper),
                _ => self.format_general(magnitude, upper),
            }
        };

        let sign = if negative && !(value.is_nan()) {
            "-"
        } else if self.plus_sign {
            "+"
        } else if self.space_sign {
            " "
        } else {
            ""
        };

        let len = sign.len() + body.len();
        if len >= self.width {
            return format!("{sign}{body}");
        }
        let fill = self.width - len;
        if self.left_justify {
            format!("{sign}{body}{}", " ".repeat(fill))
        } else if self.zero_pad && value.is_finite() {
            format!("{sign}{}{body}", "0".repeat(fill))
        } else {
            format!("{}{sign}{body}", " ".repeat(fill))
        }
    }

    fn is_integer(&self) -> bool {
        matches!(self.conversion, 'd' | 'i' | 'u')
    }

    fn format_integer(&self, magnitude: f64) -> String {
        let digits = format!("{}", magnitude.trunc() as u64);
        match self.precision {
            Some(p) if digits.len() < p => format!("{}{digits}", "0".repeat(p - digits.len())),
            Some(0) if magnitude.trunc() == 0.0 => String::new(),
            _ => digits,
        }
    }

    fn format_fixed(&self, magnitude: f64, precision: usize) -> String {
        let mut s = format!("{magnitude:.precision$}");
        if self.alternate && precision == 0 {
            s.push('.');
        }
        s
    }

    fn format_exponential(&self, magnitude: f64, precision: usize, upper: bool) -> String {
        let (mantissa, exponent) = split_exponential(magnitude, precision);
        let point = if self.alternate && precision == 0 {
            "."
        } else {
            ""
        };
        let e = if upper { 'E' } else { 'e' };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}{point}{e}{exp_sign}{:02}", exponent.abs())
    }

    fn format_general(&self, magnitude: f64, upper: bool) -> String {
        let p = match self.precision {
            Some(0) => 1,
            Some(p) => p,
            None => 6,
        };
        // The exponent after rounding to p significant digits decides the style
        let (_, exponent) = split_exponential(magnitude, p - 1);
        let mut s = if exponent >= -4 && exponent < p as i32 {
            let precision = (p as i32 - 1 - exponent) as usize;
            let mut s = format!("{magnitude:.precision$}");
            if self.alternate && !s.contains('.') {
                s.push('.');
            }
            s
        } else {
            self.format_exponential(magnitude, p - 1, upper)
        };
        if !self.alternate {
            s = strip_trailing_zeros(&s);
        }
        s
    }
}

/// Rust's `{:e}` output split into mantissa text and integer exponent
fn split_exponential(magnitude: f64, precision: usize) -> (String, i32) {
    let formatted = format!("{magnitude:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => (mantissa.to_string(), exponent.parse().unwrap_or(0)),
        None => (formatted, 0),
    }
}

fn strip_trailing_zeros(s: &str) -> String {
    let (number, exponent) = match s.find(['e', 'E']) {
        Some(i) => s.split_at(i),
        None => (s, ""),
    };
    let number = if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    };
    format!("{number}{exponent}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("%-#6.3g", 25.0, "25.0  ")]
    #[case("%-#6.3g", 0.0, "0.00  ")]
    #[case("%-#6.3g", 1000.0, "1.00e+03")]
    #[case("%-#6.3g", -0.5, "-0.500")]
    #[case("%-#6.3g", 0.0001, "0.000100")]
    #[case("%g", 100.0, "100")]
    #[case("%g", 0.00001, "1e-05")]
    #[case("%.3g", 25.0, "25")]
    #[case("%G", 1.5e-10, "1.5E-10")]
    #[case("%6.2f", 3.14159, "  3.14")]
    #[case("%06.2f", -3.14159, "-03.14")]
    #[case("%+.1f", 2.0, "+2.0")]
    #[case("%#.0f", 2.0, "2.")]
    #[case("%.2e", 12345.0, "1.23e+04")]
    #[case("%E", 0.0, "0.000000E+00")]
    #[case("%d", 42.9, "42")]
    #[case("%5d", -7.0, "   -7")]
    #[case("%.3d", 7.0, "007")]
    #[case("%lf", 1.0, "1.000000")]
    #[case("T = %.1f K", 273.15, "T = 273.1 K")]
    #[case("%.0f%%", 50.0, "50%")]
    #[case("no conversion", 1.0, "no conversion")]
    fn test_format_value(#[case] pattern: &str, #[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_value(pattern, value), expected);
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_value("%f", f64::NAN), "nan");
        assert_eq!(format_value("%F", f64::INFINITY), "INF");
        assert_eq!(format_value("%5f", f64::NEG_INFINITY), " -inf");
    }
}
