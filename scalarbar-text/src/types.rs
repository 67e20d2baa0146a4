#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::VariantNames;

use crate::measurement::TextMeasurementConfig;

/// Horizontal justification of a text item relative to its position
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical justification of a text item relative to its position.
///
/// Layout coordinates grow upward, so `Bottom` means the text sits on top of
/// its position and `Top` means it hangs below it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "snake_case")]
pub enum VerticalAlign {
    #[default]
    Bottom,
    Center,
    Top,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, VariantNames)]
#[cfg_attr(feature = "serde", serde(untagged))]
#[strum(serialize_all = "snake_case")]
pub enum FontWeight {
    Name(FontWeightNameSpec),
    Number(f32),
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::Name(FontWeightNameSpec::Normal)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "snake_case")]
pub enum FontWeightNameSpec {
    #[default]
    Normal,
    Bold,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Font and color settings shared by a family of text items (title, tick labels
/// or annotations).
///
/// `font_size` is the nominal request. Layout replaces it with a fitted size
/// unless fitting is disabled.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq)]
pub struct TextProperty {
    pub font: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub color: [f32; 4],
}

impl TextProperty {
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn measurement_config<'a>(
        &'a self,
        text: &'a str,
        font_size: f32,
    ) -> TextMeasurementConfig<'a> {
        TextMeasurementConfig {
            text,
            font: &self.font,
            font_size,
            font_weight: &self.font_weight,
            font_style: &self.font_style,
        }
    }
}

impl Default for TextProperty {
    fn default() -> Self {
        Self {
            font: "Arial".to_string(),
            font_size: 12.0,
            font_weight: FontWeight::Name(FontWeightNameSpec::Bold),
            font_style: FontStyle::Italic,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}
