#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use scalarbar_common::types::{Orientation, Rgba, TextPosition};
use scalarbar_text::types::TextProperty;

pub const MAX_NUMBER_OF_LABELS: usize = 64;
pub const MIN_MAX_COLORS: usize = 2;
/// Bound on pixel paddings, separations and line widths
pub const MAX_PIXEL_PADDING: i32 = 1 << 16;

/// Everything that controls a scalar bar layout apart from the frame rectangle
/// and the color source.
///
/// Out-of-range values are clamped by the accessor methods rather than
/// rejected, so any deserialized configuration can be laid out.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarBarConfig {
    pub orientation: Orientation,
    /// Side of the bar that holds the title and tick labels
    pub text_position: TextPosition,
    pub title: String,
    /// Appended to the title after a single space when non-empty
    pub component_title: String,
    /// printf-style format applied to tick values
    pub label_format: String,
    /// Number of tick labels, clamped to `0..=64`
    pub number_of_labels: usize,
    /// Number of quads in the color ramp, at least 2
    pub max_colors: usize,
    /// Fraction of the frame thickness given to the color bar
    pub bar_ratio: f64,
    /// Fraction of the space beside a horizontal bar given to the title
    pub title_ratio: f64,
    /// Padding between text and other elements, in pixels
    pub text_pad: i32,
    /// Extra gap between the title and a vertical bar. Negative values let the
    /// bar reach into the title's space.
    pub vertical_title_separation: i32,
    pub frame_line_width: i32,
    pub max_width_px: i32,
    pub max_height_px: i32,
    pub draw_nan_annotation: bool,
    pub draw_below_range_swatch: bool,
    pub draw_above_range_swatch: bool,
    pub nan_annotation: String,
    pub below_range_annotation: String,
    pub above_range_annotation: String,
    pub draw_annotations: bool,
    pub draw_tick_labels: bool,
    pub draw_color_bar: bool,
    pub draw_background: bool,
    pub draw_frame: bool,
    /// Carry color source alpha into the emitted ramp and swatch colors
    pub use_opacity: bool,
    /// Draw every leader line in the annotation text color
    pub fixed_annotation_leader_line_color: bool,
    /// Length of the leader between the bar and its annotation label
    pub annotation_leader_padding: f64,
    /// Use the text properties' font sizes instead of fitting text to boxes
    pub unconstrained_font_size: bool,
    pub background_color: Rgba,
    pub frame_color: Rgba,
    pub title_text_property: Option<TextProperty>,
    pub label_text_property: Option<TextProperty>,
    pub annotation_text_property: Option<TextProperty>,
}

impl ScalarBarConfig {
    pub fn number_of_labels(&self) -> usize {
        self.number_of_labels.min(MAX_NUMBER_OF_LABELS)
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors.max(MIN_MAX_COLORS)
    }

    pub fn bar_ratio(&self) -> f64 {
        self.bar_ratio.clamp(0.0, 1.0)
    }

    pub fn title_ratio(&self) -> f64 {
        self.title_ratio.clamp(0.0, 1.0)
    }

    pub fn text_pad(&self) -> i32 {
        self.text_pad.clamp(0, MAX_PIXEL_PADDING)
    }

    pub fn vertical_title_separation(&self) -> i32 {
        self.vertical_title_separation
            .clamp(-MAX_PIXEL_PADDING, MAX_PIXEL_PADDING)
    }

    pub fn frame_line_width(&self) -> i32 {
        self.frame_line_width.clamp(0, MAX_PIXEL_PADDING)
    }

    /// Title text with the component title appended
    pub fn full_title(&self) -> String {
        if self.component_title.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.component_title)
        }
    }
}

impl Default for ScalarBarConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            text_position: TextPosition::SucceedScalarBar,
            title: String::new(),
            component_title: String::new(),
            label_format: "%-#6.3g".to_string(),
            number_of_labels: 5,
            max_colors: 64,
            bar_ratio: 0.375,
            title_ratio: 0.5,
            text_pad: 1,
            vertical_title_separation: 0,
            frame_line_width: 1,
            max_width_px: i32::MAX,
            max_height_px: i32::MAX,
            draw_nan_annotation: false,
            draw_below_range_swatch: false,
            draw_above_range_swatch: false,
            nan_annotation: "NaN".to_string(),
            below_range_annotation: "Below".to_string(),
            above_range_annotation: "Above".to_string(),
            draw_annotations: true,
            draw_tick_labels: true,
            draw_color_bar: true,
            draw_background: false,
            draw_frame: false,
            use_opacity: false,
            fixed_annotation_leader_line_color: false,
            annotation_leader_padding: 8.0,
            unconstrained_font_size: false,
            background_color: [1.0, 1.0, 1.0, 0.5],
            frame_color: [1.0, 1.0, 1.0, 1.0],
            title_text_property: Some(TextProperty::default().with_font_size(18.0)),
            label_text_property: Some(TextProperty::default().with_font_size(14.0)),
            annotation_text_property: Some(TextProperty::default().with_font_size(12.0)),
        }
    }
}
