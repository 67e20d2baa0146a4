use crate::fit::{self, FittedFont};
use crate::types::{FontStyle, FontWeight, TextAlign, TextProperty, VerticalAlign};

#[cfg(feature = "cosmic-text")]
extern crate lazy_static;

#[cfg(feature = "cosmic-text")]
pub mod cosmic;

pub mod heuristic;

/// Core trait for text measurement functionality.
///
/// Layout only ever needs the extent of rendered text, so implementations are
/// free to shape text however they like. The provided font fitting methods are
/// built on [`TextMeasurer::measure_text_bounds`] and may be overridden by
/// backends with a faster search.
pub trait TextMeasurer: Send + Sync {
    /// Measures the bounding dimensions for a text string with given configuration
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds;

    /// Measures `text` drawn with `property` at an explicit font size
    fn measure(&self, text: &str, property: &TextProperty, font_size: f32) -> TextBounds {
        self.measure_text_bounds(&property.measurement_config(text, font_size))
    }

    /// Largest font size at which `text` fits in the target box
    fn constrained_font_size(
        &self,
        text: &str,
        property: &TextProperty,
        target_width: i32,
        target_height: i32,
    ) -> FittedFont {
        fit::constrained_font_size(self, text, property, target_width, target_height)
    }

    /// Largest font size at which every text in `texts` fits in the target box
    fn constrained_font_size_for_set(
        &self,
        texts: &[String],
        property: &TextProperty,
        target_width: i32,
        target_height: i32,
    ) -> FittedFont {
        fit::constrained_font_size_for_set(self, texts, property, target_width, target_height)
    }
}

/// Configuration needed for text measurement
#[derive(Debug, Clone)]
pub struct TextMeasurementConfig<'a> {
    /// The text string to measure
    pub text: &'a str,
    /// Font family name
    pub font: &'a str,
    /// Font size in pixels
    pub font_size: f32,
    /// Font weight (normal, bold, or numeric)
    pub font_weight: &'a FontWeight,
    /// Font style (normal or italic)
    pub font_style: &'a FontStyle,
}

/// Results from text measurement
#[derive(Debug, Clone, PartialEq)]
pub struct TextBounds {
    /// Total width of the text
    pub width: f32,
    /// Total height from top to bottom
    pub height: f32,
    /// Distance from top to baseline
    pub ascent: f32,
    /// Distance from bottom to baseline
    pub descent: f32,
    /// Distance from top to where the top of the next line would be
    pub line_height: f32,
}

impl TextBounds {
    /// Bounds `[x0, x1, y0, y1]` of text drawn at `position` with the given
    /// justification, in y-up coordinates.
    pub fn anchored_rect(
        &self,
        position: [f64; 2],
        align: TextAlign,
        vertical_align: VerticalAlign,
    ) -> [f64; 4] {
        let w = self.width as f64;
        let h = self.height as f64;
        let (x0, x1) = match align {
            TextAlign::Left => (position[0], position[0] + w),
            TextAlign::Center => (position[0] - w / 2.0, position[0] + w / 2.0),
            TextAlign::Right => (position[0] - w, position[0]),
        };
        let (y0, y1) = match vertical_align {
            VerticalAlign::Bottom => (position[1], position[1] + h),
            VerticalAlign::Center => (position[1] - h / 2.0, position[1] + h / 2.0),
            VerticalAlign::Top => (position[1] - h, position[1]),
        };
        [x0, x1, y0, y1]
    }

    pub fn empty() -> Self {
        TextBounds {
            width: 0.0,
            height: 0.0,
            ascent: 0.0,
            descent: 0.0,
            line_height: 0.0,
        }
    }
}

#[cfg(all(feature = "cosmic-text", not(target_arch = "wasm32")))]
pub fn default_text_measurer() -> impl TextMeasurer {
    crate::measurement::cosmic::CosmicTextMeasurer::new()
}

#[cfg(any(not(feature = "cosmic-text"), target_arch = "wasm32"))]
pub fn default_text_measurer() -> impl TextMeasurer {
    crate::measurement::heuristic::HeuristicTextMeasurer::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_bounds_anchored_rect() {
        let bounds = TextBounds {
            width: 100.0,
            height: 20.0,
            ascent: 15.0,
            descent: 5.0,
            line_height: 25.0,
        };

        let rect = bounds.anchored_rect([10.0, 10.0], TextAlign::Left, VerticalAlign::Bottom);
        assert_eq!(rect, [10.0, 110.0, 10.0, 30.0]);

        let rect = bounds.anchored_rect([10.0, 10.0], TextAlign::Center, VerticalAlign::Center);
        assert_eq!(rect, [-40.0, 60.0, 0.0, 20.0]);

        let rect = bounds.anchored_rect([10.0, 10.0], TextAlign::Right, VerticalAlign::Top);
        assert_eq!(rect, [-90.0, 10.0, -10.0, 10.0]);
    }

    #[test]
    fn test_default_measurer_available() {
        let measurer = default_text_measurer();
        let property = TextProperty::default();
        assert_eq!(measurer.measure("", &property, 12.0), TextBounds::empty());
    }
}
