//! Drawable primitives for a resolved layout.
//!
//! Nothing here rasterizes. Primitives are expressed in frame-local pixel
//! coordinates with y growing upward, ready to be translated by the frame
//! origin and handed to a renderer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use scalarbar_colors::source::NAN_COLOR_INDEX;
use scalarbar_common::types::{to_rgba8, LayoutBox, Rgba, Rgba8};
use scalarbar_text::types::{TextAlign, TextProperty, VerticalAlign};

use crate::context::LayoutContext;
use crate::placement::{AnnotationLabel, LeaderLines};

/// A positioned text item with its resolved bounds `[x0, x1, y0, y1]`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub font_size: f32,
    pub position: [f64; 2],
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub color: Rgba,
    pub bounds: [f64; 4],
}

/// A filled quad, corners counter-clockwise
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub points: [[f64; 2]; 4],
    pub color: Rgba8,
}

/// Closed frame outline drawn around the whole legend
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutline {
    pub points: [[f64; 2]; 5],
    pub color: Rgba8,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwatchTriangle {
    pub indices: [usize; 3],
    pub color: Rgba8,
}

/// Per-category swatches of an indexed bar.
///
/// Each category contributes four points and two triangles.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IndexedSwatches {
    pub points: Vec<[f64; 2]>,
    pub triangles: Vec<SwatchTriangle>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScalarBarGeometry {
    pub frame: Option<FrameOutline>,
    pub background: Option<Quad>,
    /// Continuous ramp, one quad per color
    pub color_bar: Vec<Quad>,
    pub annotation_swatches: IndexedSwatches,
    pub nan_swatch: Option<Quad>,
    pub below_range_swatch: Option<Quad>,
    pub above_range_swatch: Option<Quad>,
    pub title: Option<TextItem>,
    pub tick_labels: Vec<TextItem>,
    pub annotation_labels: Vec<TextItem>,
    pub leader_lines: LeaderLines,
}

pub(crate) fn emit_geometry(
    ctx: &LayoutContext,
    annotations: &[AnnotationLabel],
    leader_lines: &LeaderLines,
) -> ScalarBarGeometry {
    let config = ctx.config;
    let indexed = ctx.is_indexed();
    let (frame, background) = frame_geometry(ctx);

    let mut geometry = ScalarBarGeometry {
        frame,
        background,
        title: title_item(ctx),
        ..Default::default()
    };

    if config.draw_color_bar {
        if indexed {
            if !ctx.labels.is_empty() {
                geometry.annotation_swatches = indexed_swatches(ctx);
            }
        } else {
            geometry.color_bar = color_bar_quads(ctx);
        }
    }
    if config.draw_tick_labels && !indexed {
        geometry.tick_labels = tick_items(ctx);
    }

    let nan_color = ctx.colors.indexed_color(NAN_COLOR_INDEX);
    let out_of_range = ctx.colors.out_of_range_colors();
    if config.draw_nan_annotation {
        geometry.nan_swatch = Some(swatch_quad(ctx, &ctx.boxes.nan, &nan_color));
    }
    if config.draw_below_range_swatch {
        let color = out_of_range.map_or(nan_color, |c| c.below_range_color());
        geometry.below_range_swatch = Some(swatch_quad(ctx, &ctx.boxes.below_range, &color));
    }
    if config.draw_above_range_swatch {
        let color = out_of_range.map_or(nan_color, |c| c.above_range_color());
        geometry.above_range_swatch = Some(swatch_quad(ctx, &ctx.boxes.above_range, &color));
    }

    if config.draw_annotations {
        geometry.annotation_labels = annotations
            .iter()
            .map(|label| TextItem {
                text: label.text.clone(),
                font_size: label.font_size,
                position: label.placement.anchor,
                align: label.placement.justification,
                vertical_align: label.placement.vertical_align,
                color: ctx.annotation_property.color,
                bounds: label.placement.bounds,
            })
            .collect();
        geometry.leader_lines = leader_lines.clone();
    }

    tracing::trace!(
        color_bar = geometry.color_bar.len(),
        swatch_points = geometry.annotation_swatches.points.len(),
        tick_labels = geometry.tick_labels.len(),
        annotation_labels = geometry.annotation_labels.len(),
        "emitted geometry"
    );
    geometry
}

fn frame_geometry(ctx: &LayoutContext) -> (Option<FrameOutline>, Option<Quad>) {
    let config = ctx.config;
    let [w, h] = ctx.boxes.frame.extent(ctx.tl);
    let (w, h) = (w as f64 - 0.5, h as f64 - 0.5);
    let points = [[0.0, 0.0], [0.0, h], [w, h], [w, 0.0], [0.0, 0.0]];

    let frame = config.draw_frame.then(|| FrameOutline {
        points,
        color: to_rgba8(&config.frame_color, true),
    });
    let background = config.draw_background.then(|| Quad {
        points: [points[0], points[1], points[2], points[3]],
        color: to_rgba8(&config.background_color, true),
    });
    (frame, background)
}

fn swatch_quad(ctx: &LayoutContext, swatch: &LayoutBox, color: &Rgba) -> Quad {
    Quad {
        points: swatch.corners(ctx.tl),
        color: to_rgba8(color, ctx.config.use_opacity),
    }
}

/// Screen corners of the slice `[l0, l1]` along the bar, spanning `[c0, c1]` across it
fn bar_slice(vertical: bool, c0: f64, c1: f64, l0: f64, l1: f64) -> [[f64; 2]; 4] {
    if vertical {
        [[c0, l0], [c1, l0], [c1, l1], [c0, l1]]
    } else {
        [[l0, c0], [l1, c0], [l1, c1], [l0, c1]]
    }
}

fn color_bar_quads(ctx: &LayoutContext) -> Vec<Quad> {
    let tl = ctx.tl;
    let bar = ctx.boxes.scalar_bar;
    let n = ctx.config.max_colors();
    let delta = bar.size[1] as f64 / n as f64;
    let c0 = bar.posn[tl[0]] as f64;
    let c1 = c0 + bar.size[0] as f64;
    let start = bar.posn[tl[1]] as f64;

    let (r0, r1) = ctx.colors.range();
    let log_scale = ctx.colors.uses_log_scale();
    let (lo, hi) = if log_scale {
        (r0.log10(), r1.log10())
    } else {
        (r0, r1)
    };
    let opacity = ctx.colors.opacity();

    (0..n)
        .map(|i| {
            let t = lo + (hi - lo) * i as f64 / n as f64;
            let value = if log_scale { 10f64.powf(t) } else { t };
            let mut color = ctx.colors.color(value);
            color[3] *= opacity;
            let l0 = start + i as f64 * delta;
            Quad {
                points: bar_slice(ctx.is_vertical(), c0, c1, l0, l0 + delta),
                color: to_rgba8(&color, ctx.config.use_opacity),
            }
        })
        .collect()
}

fn indexed_swatches(ctx: &LayoutContext) -> IndexedSwatches {
    let n = ctx.num_notes;
    if n == 0 {
        return IndexedSwatches::default();
    }
    let tl = ctx.tl;
    let bar = ctx.boxes.scalar_bar;
    let pad = ctx.swatch_pad;
    let delta = bar.size[1] as f64 / n as f64;
    let c0 = bar.posn[tl[0]] as f64;
    let c1 = c0 + bar.size[0] as f64;
    let available = ctx.colors.number_of_available_colors().max(1);

    let mut swatches = IndexedSwatches {
        points: Vec::with_capacity(4 * n),
        triangles: Vec::with_capacity(2 * n),
    };
    for i in 0..n {
        let corners = if ctx.is_vertical() {
            // first category at the top
            let top = (bar.posn[1] + bar.size[1]) as f64 - i as f64 * delta - pad;
            let bottom = top - (delta - 2.0 * pad);
            [[c0, top], [c1, top], [c1, bottom], [c0, bottom]]
        } else {
            let x0 = bar.posn[0] as f64 + i as f64 * delta + pad;
            let x1 = x0 + delta - 2.0 * pad;
            [[x0, c0], [x1, c0], [x1, c1], [x0, c1]]
        };
        let base = swatches.points.len();
        swatches.points.extend(corners);

        let color = ctx.colors.indexed_color((i % available) as i64);
        swatches.triangles.push(SwatchTriangle {
            indices: [base, base + 1, base + 2],
            color: to_rgba8(&color, true),
        });
        swatches.triangles.push(SwatchTriangle {
            indices: [base, base + 2, base + 3],
            color: to_rgba8(&color, false),
        });
    }
    swatches
}

fn text_item(
    ctx: &LayoutContext,
    text: &str,
    property: &TextProperty,
    font_size: f32,
    position: [f64; 2],
    align: TextAlign,
    vertical_align: VerticalAlign,
) -> TextItem {
    let bounds = ctx
        .measurer
        .measure(text, property, font_size)
        .anchored_rect(position, align, vertical_align);
    TextItem {
        text: text.to_string(),
        font_size,
        position,
        align,
        vertical_align,
        color: property.color,
        bounds,
    }
}

fn title_item(ctx: &LayoutContext) -> Option<TextItem> {
    if ctx.title.text.is_empty() {
        return None;
    }
    let tl = ctx.tl;
    let title = ctx.boxes.title;
    let position = [
        (title.posn[0] + title.size[tl[0]] / 2) as f64,
        (title.posn[1] + title.size[tl[1]]) as f64,
    ];
    Some(text_item(
        ctx,
        &ctx.title.text,
        ctx.title_property,
        ctx.title.font_size,
        position,
        TextAlign::Center,
        VerticalAlign::Top,
    ))
}

fn tick_items(ctx: &LayoutContext) -> Vec<TextItem> {
    let tl = ctx.tl;
    let ticks = ctx.boxes.ticks;
    let precede = ctx.precede();
    let n = ctx.ticks.len();

    ctx.ticks
        .iter()
        .enumerate()
        .map(|(i, tick)| {
            let t = if n > 1 {
                i as f64 / (n - 1) as f64
            } else {
                0.5
            };
            let val = t * ticks.size[1] as f64 + ticks.posn[tl[1]] as f64;
            let (position, align, vertical_align) = if ctx.is_vertical() {
                let h = ctx
                    .measurer
                    .measure(&tick.text, ctx.label_property, ctx.tick_font_size)
                    .height as f64;
                let x = if precede {
                    (ticks.posn[0] + ticks.size[0]) as f64
                } else {
                    ticks.posn[0] as f64
                };
                let align = if precede {
                    TextAlign::Right
                } else {
                    TextAlign::Left
                };
                ([x, val - 0.5 * h], align, VerticalAlign::Bottom)
            } else {
                let y = if precede {
                    (ticks.posn[1] + ticks.size[0]) as f64
                } else {
                    ticks.posn[1] as f64
                };
                let vertical_align = if precede {
                    VerticalAlign::Top
                } else {
                    VerticalAlign::Bottom
                };
                ([val, y], TextAlign::Center, vertical_align)
            };
            text_item(
                ctx,
                &tick.text,
                ctx.label_property,
                ctx.tick_font_size,
                position,
                align,
                vertical_align,
            )
        })
        .collect()
}
