//! Mapping annotated values onto positions along the color bar.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt::Debug;

use ordered_float::OrderedFloat;
use scalarbar_colors::source::NAN_COLOR_INDEX;
use scalarbar_common::types::{to_rgb8, LayoutBox, Rgb8, Rgba};

use crate::context::LayoutContext;

/// A label waiting to be placed, keyed in a [`LabelMap`] by its anchor
/// coordinate along the long axis of the bar
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEntry {
    pub text: String,
    /// Leader line color
    pub color: Rgb8,
}

/// Labels ordered by anchor coordinate.
///
/// The map holds one label per coordinate. A label mapped to a coordinate that
/// is already taken replaces the earlier label.
pub type LabelMap = BTreeMap<OrderedFloat<f64>, LabelEntry>;

/// Hook for adding, removing or rewriting labels after they are mapped and
/// before they are placed
pub trait AnnotationEditor: Debug + Send + Sync {
    fn edit_annotations(&self, labels: &mut LabelMap);
}

/// Insert `entry` at `anchor`, replacing any label already there
pub fn insert_label(labels: &mut LabelMap, anchor: f64, entry: LabelEntry) {
    if let Some(previous) = labels.insert(OrderedFloat(anchor), entry) {
        tracing::debug!(
            anchor,
            replaced = %previous.text,
            "annotation replaced a label at the same position"
        );
    }
}

/// Build the label map from the color source annotations and the NaN and
/// out-of-range swatch labels.
pub(crate) fn layout_annotations(ctx: &mut LayoutContext, editor: Option<&dyn AnnotationEditor>) {
    ctx.labels.clear();
    if !ctx.config.draw_annotations {
        return;
    }

    let tl = ctx.tl;
    let bar = ctx.boxes.scalar_bar;
    let start = bar.posn[tl[1]] as f64;
    let delta = bar.size[1] as f64;
    map_color_source_annotations(ctx, start, delta);

    let config = ctx.config;
    let nan_color = ctx.colors.indexed_color(NAN_COLOR_INDEX);
    if config.draw_nan_annotation && !config.nan_annotation.is_empty() {
        let anchor = swatch_center(&ctx.boxes.nan, tl);
        insert_label(
            &mut ctx.labels,
            anchor,
            LabelEntry {
                text: config.nan_annotation.clone(),
                color: to_rgb8(&nan_color),
            },
        );
    }

    let out_of_range = ctx.colors.out_of_range_colors();
    if config.draw_below_range_swatch && !config.below_range_annotation.is_empty() {
        let color: Rgba = out_of_range.map_or(nan_color, |c| c.below_range_color());
        let anchor = swatch_center(&ctx.boxes.below_range, tl);
        insert_label(
            &mut ctx.labels,
            anchor,
            LabelEntry {
                text: config.below_range_annotation.clone(),
                color: to_rgb8(&color),
            },
        );
    }
    if config.draw_above_range_swatch && !config.above_range_annotation.is_empty() {
        let color: Rgba = out_of_range.map_or(nan_color, |c| c.above_range_color());
        let anchor = swatch_center(&ctx.boxes.above_range, tl);
        insert_label(
            &mut ctx.labels,
            anchor,
            LabelEntry {
                text: config.above_range_annotation.clone(),
                color: to_rgb8(&color),
            },
        );
    }

    if let Some(editor) = editor {
        editor.edit_annotations(&mut ctx.labels);
    }
    tracing::debug!(count = ctx.labels.len(), "mapped annotations");
}

fn swatch_center(swatch: &LayoutBox, tl: [usize; 2]) -> f64 {
    swatch.posn[tl[1]] as f64 + swatch.size[1] as f64 / 2.0
}

fn map_color_source_annotations(ctx: &mut LayoutContext, start: f64, delta: f64) {
    let colors = ctx.colors;
    let annotations = colors.annotations();
    let n = annotations.len() as f64;
    let (lo, hi) = colors.range();
    let span = hi - lo;
    let indexed = colors.is_indexed_lookup();
    let vertical = ctx.is_vertical();

    for (i, annotation) in annotations.iter().enumerate() {
        if annotation.label.is_empty() {
            continue;
        }
        let anchor = if indexed {
            // a vertical indexed bar lists its first category at the top
            let slot = if vertical {
                n - i as f64 - 0.5
            } else {
                i as f64 + 0.5
            };
            start + slot * delta / n
        } else {
            let Some(value) = annotation.value.to_f64() else {
                tracing::debug!(value = %annotation.value, "skipping non-numeric annotation");
                continue;
            };
            if !(value >= lo && value <= hi) {
                tracing::debug!(value, lo, hi, "skipping annotation outside the color range");
                continue;
            }
            if span == 0.0 {
                start
            } else {
                start + (value - lo) * delta / span
            }
        };
        let color = colors.annotation_color(&annotation.value);
        insert_label(
            &mut ctx.labels,
            anchor,
            LabelEntry {
                text: annotation.label.clone(),
                color: to_rgb8(&color),
            },
        );
    }
}
