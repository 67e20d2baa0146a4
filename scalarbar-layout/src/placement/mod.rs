//! Non-overlapping placement of annotation labels.
//!
//! Labels are placed from the middle of the bar outward. A vertical bar stacks
//! labels beside the bar and pushes them apart along the bar. A horizontal bar
//! justifies labels away from the center and displaces colliding labels away
//! from the bar, routing broken leader lines around labels in the way.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use scalarbar_common::types::{to_rgb8, Rgb8};
use scalarbar_text::types::{TextAlign, VerticalAlign};

use crate::context::LayoutContext;

pub mod horizontal;
pub mod vertical;

pub use horizontal::HorizontalPlacer;
pub use vertical::VerticalPlacer;

/// Measured size of a label and its anchor coordinate along the bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelExtent {
    pub anchor: f64,
    pub width: f64,
    pub height: f64,
}

/// Final position of one label
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlacementRecord {
    /// `[x0, x1, y0, y1]` with `x0 <= x1` and `y0 <= y1`
    pub bounds: [f64; 4],
    pub justification: TextAlign,
    pub vertical_align: VerticalAlign,
    /// Point the text is drawn at under its justification
    pub anchor: [f64; 2],
}

impl PlacementRecord {
    pub fn x_range(&self) -> [f64; 2] {
        [self.bounds[0], self.bounds[1]]
    }

    pub fn y_range(&self) -> [f64; 2] {
        [self.bounds[2], self.bounds[3]]
    }
}

/// One straight piece of a leader line belonging to label `label`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderPath {
    pub label: usize,
    pub points: [[f64; 2]; 2],
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlacerOutput {
    pub placements: Vec<PlacementRecord>,
    pub leaders: Vec<LeaderPath>,
}

/// Positions a set of labels sorted by anchor coordinate
pub trait LabelPlacer {
    fn place(&self, labels: &[LabelExtent]) -> PlacerOutput;
}

/// A placed annotation label
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationLabel {
    pub text: String,
    pub font_size: f32,
    /// Coordinate along the bar the label refers to
    pub anchor_position: f64,
    pub color: Rgb8,
    pub placement: PlacementRecord,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderSegment {
    pub points: [[f64; 2]; 2],
    pub color: Rgb8,
}

/// Leader lines from the bar to each annotation label.
///
/// When `fixed_color` is set every segment is drawn in that color and the
/// per-segment colors are ignored.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LeaderLines {
    pub segments: Vec<LeaderSegment>,
    pub fixed_color: Option<Rgb8>,
}

/// Where the placers should put labels for the current bar
pub(crate) fn placer_for(ctx: &LayoutContext) -> Box<dyn LabelPlacer> {
    let tl = ctx.tl;
    let bar = ctx.boxes.scalar_bar;
    let pad = ctx.swatch_pad;
    let leader_pad = ctx.config.annotation_leader_padding;
    let precede = ctx.precede();
    let (c0, c1) = (bar.posn[tl[0]] as f64, (bar.posn[tl[0]] + bar.size[0]) as f64);

    if ctx.is_vertical() {
        Box::new(VerticalPlacer {
            bar_x: if precede { c1 } else { c0 },
            bar_y: bar.posn[1] as f64,
            bar_height: bar.size[1] as f64,
            pad,
            leader_pad,
            precede,
        })
    } else {
        Box::new(HorizontalPlacer {
            bar_y: c1,
            bar_height: bar.size[0] as f64,
            pad,
            leader_pad,
            precede,
        })
    }
}

/// Measure and place every mapped annotation label
pub(crate) fn place_annotations(ctx: &LayoutContext) -> (Vec<AnnotationLabel>, LeaderLines) {
    let property = ctx.annotation_property;
    let fixed_color = ctx
        .config
        .fixed_annotation_leader_line_color
        .then(|| to_rgb8(&property.color));
    if ctx.labels.is_empty() {
        return (
            Vec::new(),
            LeaderLines {
                segments: Vec::new(),
                fixed_color,
            },
        );
    }

    let extents: Vec<LabelExtent> = ctx
        .labels
        .iter()
        .map(|(anchor, entry)| {
            let bounds = ctx.measurer.measure(&entry.text, property, property.font_size);
            LabelExtent {
                anchor: anchor.into_inner(),
                width: bounds.width as f64,
                height: bounds.height as f64,
            }
        })
        .collect();

    let output = placer_for(ctx).place(&extents);
    let entries: Vec<_> = ctx.labels.values().collect();

    let labels = ctx
        .labels
        .iter()
        .zip(output.placements)
        .map(|((anchor, entry), placement)| AnnotationLabel {
            text: entry.text.clone(),
            font_size: property.font_size,
            anchor_position: anchor.into_inner(),
            color: entry.color,
            placement,
        })
        .collect();

    let segments = output
        .leaders
        .iter()
        .map(|leader| LeaderSegment {
            points: leader.points,
            color: entries[leader.label].color,
        })
        .collect();

    (
        labels,
        LeaderLines {
            segments,
            fixed_color,
        },
    )
}
