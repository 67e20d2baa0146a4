#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use scalarbar_colors::ColorSource;
use scalarbar_common::types::{LayoutBox, Orientation};
use scalarbar_text::measurement::TextMeasurer;
use scalarbar_text::types::TextProperty;

use crate::annotations::LabelMap;
use crate::config::ScalarBarConfig;
use crate::frame::FrameSnapshot;
use crate::ticks::TickLabel;

/// Every box resolved by a layout pass, in frame-local coordinates
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutBoxes {
    pub frame: LayoutBox,
    pub scalar_bar: LayoutBox,
    pub title: LayoutBox,
    pub ticks: LayoutBox,
    pub nan: LayoutBox,
    pub below_range: LayoutBox,
    pub above_range: LayoutBox,
}

impl LayoutBoxes {
    /// Same boxes with negative sizes clamped to zero
    pub fn clamped(self) -> Self {
        Self {
            frame: self.frame.clamped(),
            scalar_bar: self.scalar_bar.clamped(),
            title: self.title.clamped(),
            ticks: self.ticks.clamped(),
            nan: self.nan.clamped(),
            below_range: self.below_range.clamped(),
            above_range: self.above_range.clamped(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &LayoutBox)> {
        [
            ("frame", &self.frame),
            ("scalar_bar", &self.scalar_bar),
            ("title", &self.title),
            ("ticks", &self.ticks),
            ("nan", &self.nan),
            ("below_range", &self.below_range),
            ("above_range", &self.above_range),
        ]
        .into_iter()
    }
}

/// Fitted title text
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct TitleState {
    pub text: String,
    pub font_size: f32,
}

/// Mutable state threaded through the layout stages.
///
/// Stages must run in pipeline order. Each one reads fields written by the
/// stages before it and never revisits earlier boxes except where noted.
pub(crate) struct LayoutContext<'a> {
    pub config: &'a ScalarBarConfig,
    pub colors: &'a dyn ColorSource,
    pub measurer: &'a dyn TextMeasurer,
    pub title_property: &'a TextProperty,
    pub label_property: &'a TextProperty,
    pub annotation_property: &'a TextProperty,
    pub tl: [usize; 2],
    /// Annotated values in the color source
    pub num_notes: usize,
    pub boxes: LayoutBoxes,
    pub snapshot: FrameSnapshot,
    pub swatch_pad: f64,
    pub nan_swatch_size: f64,
    pub below_swatch_size: f64,
    pub above_swatch_size: f64,
    pub title: TitleState,
    pub ticks: Vec<TickLabel>,
    pub tick_font_size: f32,
    pub labels: LabelMap,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        config: &'a ScalarBarConfig,
        colors: &'a dyn ColorSource,
        measurer: &'a dyn TextMeasurer,
        title_property: &'a TextProperty,
        label_property: &'a TextProperty,
        annotation_property: &'a TextProperty,
    ) -> Self {
        Self {
            config,
            colors,
            measurer,
            title_property,
            label_property,
            annotation_property,
            tl: config.orientation.tl(),
            num_notes: colors.annotations().len(),
            boxes: LayoutBoxes::default(),
            snapshot: FrameSnapshot::default(),
            swatch_pad: 0.0,
            nan_swatch_size: 0.0,
            below_swatch_size: 0.0,
            above_swatch_size: 0.0,
            title: TitleState::default(),
            ticks: Vec::new(),
            tick_font_size: label_property.font_size,
            labels: LabelMap::new(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    pub fn is_vertical(&self) -> bool {
        self.config.orientation.is_vertical()
    }

    pub fn precede(&self) -> bool {
        self.config.text_position.is_precede()
    }

    pub fn pad(&self) -> i32 {
        self.config.text_pad()
    }

    pub fn is_indexed(&self) -> bool {
        self.colors.is_indexed_lookup()
    }
}
