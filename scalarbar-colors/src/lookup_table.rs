use crate::error::ColorError;
use crate::source::{ColorSource, OutOfRangeColors, NAN_COLOR_INDEX};
use scalarbar_common::types::Rgba;
use scalarbar_common::value::{AnnotatedValue, Annotation};

const DEFAULT_NAN_COLOR: Rgba = [0.5, 0.0, 0.0, 1.0];
const DEFAULT_BELOW_RANGE_COLOR: Rgba = [0.0, 0.0, 0.0, 1.0];
const DEFAULT_ABOVE_RANGE_COLOR: Rgba = [1.0, 1.0, 1.0, 1.0];

/// A table of evenly spaced colors over a scalar range.
///
/// In continuous mode a value selects the table entry whose bin contains it
/// (bins are uniform in log space when `log_scale` is set). In indexed mode the
/// annotated values are categories and annotation `i` is drawn with color `i`
/// modulo the table size.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    colors: Vec<Rgba>,
    range: (f64, f64),
    log_scale: bool,
    indexed_lookup: bool,
    opacity: f32,
    annotations: Vec<Annotation>,
    nan_color: Rgba,
    below_range_color: Rgba,
    above_range_color: Rgba,
}

impl LookupTable {
    pub fn try_new(colors: Vec<Rgba>, range: (f64, f64)) -> Result<Self, ColorError> {
        if colors.is_empty() {
            return Err(ColorError::EmptyTable);
        }
        let (lo, hi) = range;
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(ColorError::InvalidRange { lo, hi });
        }
        Ok(Self {
            colors,
            range,
            log_scale: false,
            indexed_lookup: false,
            opacity: 1.0,
            annotations: Vec::new(),
            nan_color: DEFAULT_NAN_COLOR,
            below_range_color: DEFAULT_BELOW_RANGE_COLOR,
            above_range_color: DEFAULT_ABOVE_RANGE_COLOR,
        })
    }

    /// Ramp of `n` colors interpolated between `start` and `end`
    pub fn try_linear_ramp(
        start: Rgba,
        end: Rgba,
        n: usize,
        range: (f64, f64),
    ) -> Result<Self, ColorError> {
        let ctf = crate::transfer_function::ColorTransferFunction::try_new(vec![
            (0.0, start),
            (1.0, end),
        ])?;
        let colors = (0..n)
            .map(|i| {
                let t = if n > 1 {
                    i as f64 / (n - 1) as f64
                } else {
                    0.0
                };
                ctf.color(t)
            })
            .collect();
        Self::try_new(colors, range)
    }

    pub fn with_log_scale(mut self, log_scale: bool) -> Result<Self, ColorError> {
        let (lo, hi) = self.range;
        if log_scale && (lo <= 0.0 || hi <= 0.0) {
            return Err(ColorError::NonPositiveLogRange { lo, hi });
        }
        self.log_scale = log_scale;
        Ok(self)
    }

    pub fn with_indexed_lookup(mut self, indexed_lookup: bool) -> Self {
        self.indexed_lookup = indexed_lookup;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_annotation(
        mut self,
        value: impl Into<AnnotatedValue>,
        label: impl Into<String>,
    ) -> Self {
        self.annotations.push(Annotation::new(value, label));
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_nan_color(mut self, color: Rgba) -> Self {
        self.nan_color = color;
        self
    }

    pub fn with_below_range_color(mut self, color: Rgba) -> Self {
        self.below_range_color = color;
        self
    }

    pub fn with_above_range_color(mut self, color: Rgba) -> Self {
        self.above_range_color = color;
        self
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    fn table_index(&self, value: f64) -> usize {
        let (lo, hi) = self.range;
        let (v, lo, hi) = if self.log_scale {
            (value.log10(), lo.log10(), hi.log10())
        } else {
            (value, lo, hi)
        };
        let n = self.colors.len();
        if hi <= lo {
            return 0;
        }
        let t = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
        ((t * n as f64) as usize).min(n - 1)
    }

    fn annotation_index(&self, value: &AnnotatedValue) -> Option<usize> {
        self.annotations.iter().position(|a| &a.value == value)
    }
}

impl ColorSource for LookupTable {
    fn color(&self, value: f64) -> Rgba {
        if value.is_nan() || (self.log_scale && value <= 0.0) {
            return self.nan_color;
        }
        self.colors[self.table_index(value)]
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn indexed_color(&self, index: i64) -> Rgba {
        if index == NAN_COLOR_INDEX || index < 0 {
            return self.nan_color;
        }
        self.colors[index as usize % self.colors.len()]
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn is_indexed_lookup(&self) -> bool {
        self.indexed_lookup
    }

    fn uses_log_scale(&self) -> bool {
        self.log_scale
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn annotation_color(&self, value: &AnnotatedValue) -> Rgba {
        if self.indexed_lookup {
            match self.annotation_index(value) {
                Some(i) => self.indexed_color(i as i64),
                None => self.nan_color,
            }
        } else {
            match value.to_f64() {
                Some(v) => self.color(v),
                None => self.nan_color,
            }
        }
    }

    fn number_of_available_colors(&self) -> usize {
        self.colors.len()
    }

    fn out_of_range_colors(&self) -> Option<&dyn OutOfRangeColors> {
        Some(self)
    }
}

impl OutOfRangeColors for LookupTable {
    fn below_range_color(&self) -> Rgba {
        self.below_range_color
    }

    fn above_range_color(&self) -> Rgba {
        self.above_range_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_table() -> LookupTable {
        LookupTable::try_new(
            vec![
                [0.0, 0.0, 0.0, 1.0],
                [0.5, 0.5, 0.5, 1.0],
                [1.0, 1.0, 1.0, 1.0],
            ],
            (0.0, 3.0),
        )
        .unwrap()
    }

    #[test]
    fn test_continuous_bins() {
        let table = grey_table();
        assert_eq!(table.color(-5.0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(table.color(1.5), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(table.color(3.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(table.color(f64::NAN), DEFAULT_NAN_COLOR);
    }

    #[test]
    fn test_indexed_wraps() {
        let table = grey_table();
        assert_eq!(table.indexed_color(4), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(table.indexed_color(NAN_COLOR_INDEX), DEFAULT_NAN_COLOR);
    }

    #[test]
    fn test_log_scale_requires_positive_range() {
        assert_eq!(
            grey_table().with_log_scale(true),
            Err(ColorError::NonPositiveLogRange { lo: 0.0, hi: 3.0 })
        );
    }
}
