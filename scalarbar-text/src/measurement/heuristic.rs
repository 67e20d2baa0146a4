use super::{TextBounds, TextMeasurementConfig, TextMeasurer};

/// Deterministic measurer that sizes text from its character count.
///
/// Every character is `char_width * font_size` wide and every line is
/// `height * font_size` tall. Useful when no fonts are available and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicTextMeasurer {
    pub char_width: f32,
    pub height: f32,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width: 0.6,
            height: 1.0,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
        if config.text.is_empty() || config.font_size <= 0.0 {
            return TextBounds::empty();
        }
        let size = config.font_size;
        let chars = config.text.chars().count() as f32;
        TextBounds {
            width: chars * size * self.char_width,
            height: size * self.height,
            ascent: 0.8 * size * self.height,
            descent: 0.2 * size * self.height,
            line_height: 1.2 * size * self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FontStyle, FontWeight};
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_heuristic_bounds() {
        let measurer = HeuristicTextMeasurer::default();
        let weight = FontWeight::default();
        let style = FontStyle::default();
        let bounds = measurer.measure_text_bounds(&TextMeasurementConfig {
            text: "0.500",
            font: "Arial",
            font_size: 10.0,
            font_weight: &weight,
            font_style: &style,
        });
        assert_approx_eq!(f32, bounds.width, 30.0);
        assert_approx_eq!(f32, bounds.height, 10.0);
        assert_approx_eq!(f32, bounds.ascent + bounds.descent, bounds.height);
    }
}
