//! Color bar thickness and the NaN and out-of-range swatches.
//!
//! Swatches are stacked along the long axis. On a vertical bar the NaN swatch
//! sits at the bottom of the frame, the below-range swatch above it, and the
//! above-range swatch past the far end of the ramp. On a horizontal bar the
//! below-range swatch starts the ramp while the NaN and above-range swatches
//! sit at the far end.

use crate::context::LayoutContext;

const DEFAULT_SWATCH_PAD: f64 = 4.0;
const MIN_SWATCH_SIZE: i32 = 4;

/// Size the bar across its long axis and nudge it off the frame edge
pub(crate) fn compute_scalar_bar_thickness(ctx: &mut LayoutContext) {
    let tl = ctx.tl;
    let frame = ctx.boxes.frame;
    let precede = ctx.precede();
    let bar = &mut ctx.boxes.scalar_bar;

    bar.size[0] = (frame.size[0] as f64 * ctx.config.bar_ratio()).ceil() as i32;
    bar.posn = frame.posn;
    if precede {
        bar.posn[tl[0]] += frame.size[0] - bar.size[0];
    }

    let nudge = (bar.size[0] as f64 / 8.0).min(ctx.config.text_pad() as f64);
    bar.size[0] = (bar.size[0] as f64 - nudge) as i32;
    let direction = if precede { -1.0 } else { 1.0 };
    bar.posn[tl[0]] = (bar.posn[tl[0]] as f64 + nudge * direction) as i32;
}

/// Padding between swatches, shrunk when many annotated categories share the frame
pub(crate) fn compute_swatch_pad(ctx: &mut LayoutContext) {
    let length = ctx.boxes.frame.size[1];
    ctx.swatch_pad = if ctx.num_notes > 0 {
        let per_note = length / i32::try_from(ctx.num_notes).unwrap_or(i32::MAX);
        if per_note as f64 > 16.0 {
            DEFAULT_SWATCH_PAD
        } else {
            per_note as f64 / 4.0
        }
    } else {
        DEFAULT_SWATCH_PAD
    };
}

/// Nominal long-axis size of a swatch before padding is taken out
fn swatch_size(ctx: &LayoutContext, enabled: bool) -> f64 {
    if !enabled {
        return 0.0;
    }
    let length = ctx.boxes.frame.size[1];
    let mut size = ctx.boxes.scalar_bar.size[0].min(length / 4);
    if size < MIN_SWATCH_SIZE && length > 16 {
        size = MIN_SWATCH_SIZE;
    }
    size as f64
}

/// Long-axis extent of a swatch box, leaving a text pad gap when there is room
fn padded_swatch_length(size: f64, pad: i32) -> i32 {
    let length = size as i32;
    if length > 2 * pad {
        length - pad
    } else {
        length
    }
}

pub(crate) fn layout_nan_swatch(ctx: &mut LayoutContext) {
    let tl = ctx.tl;
    let pad = ctx.pad();
    let size = swatch_size(ctx, ctx.config.draw_nan_annotation);
    ctx.nan_swatch_size = size;

    let frame = ctx.boxes.frame;
    let bar = ctx.boxes.scalar_bar;
    let nan = &mut ctx.boxes.nan;
    if ctx.config.orientation.is_vertical() {
        nan.posn = [bar.posn[0], frame.posn[1] + pad];
        ctx.boxes.scalar_bar.posn[1] =
            (bar.posn[1] as f64 + size + ctx.swatch_pad) as i32;
    } else {
        nan.posn = bar.posn;
        nan.posn[tl[1]] = (nan.posn[tl[1]] as f64 + (frame.size[1] as f64 - size)) as i32;
    }
    nan.size = [bar.size[0], padded_swatch_length(size, pad)];
    tracing::trace!(nan = ?ctx.boxes.nan, size, "laid out NaN swatch");
}

pub(crate) fn layout_below_range_swatch(ctx: &mut LayoutContext) {
    let pad = ctx.pad();
    let size = swatch_size(ctx, ctx.config.draw_below_range_swatch);
    ctx.below_swatch_size = size;

    let frame = ctx.boxes.frame;
    let bar = ctx.boxes.scalar_bar;
    let nan = ctx.boxes.nan;
    let below = &mut ctx.boxes.below_range;
    if ctx.config.orientation.is_vertical() {
        below.posn = [bar.posn[0], frame.posn[1] + pad];
        if ctx.config.draw_nan_annotation {
            below.posn[1] = (below.posn[1] as f64 + (nan.size[1] as f64 + ctx.swatch_pad)) as i32;
        }
        ctx.boxes.scalar_bar.posn[1] = (bar.posn[1] as f64 + size) as i32;
    } else {
        below.posn = bar.posn;
    }
    below.size = [bar.size[0], padded_swatch_length(size, pad)];
    tracing::trace!(below_range = ?ctx.boxes.below_range, size, "laid out below-range swatch");
}

/// Only the size is known here; the position waits for the bar length
pub(crate) fn layout_above_range_swatch(ctx: &mut LayoutContext) {
    ctx.above_swatch_size = swatch_size(ctx, ctx.config.draw_above_range_swatch);
}

pub(crate) fn layout_above_range_swatch_posn(ctx: &mut LayoutContext) {
    let tl = ctx.tl;
    let pad = ctx.pad();
    let swatch_pad = ctx.swatch_pad;
    let frame = ctx.boxes.frame;
    let bar = ctx.boxes.scalar_bar;
    let nan = ctx.boxes.nan;
    let below = ctx.boxes.below_range;
    let size = ctx.above_swatch_size;
    let above = &mut ctx.boxes.above_range;

    if ctx.config.orientation.is_vertical() {
        above.posn[0] = bar.posn[0];
        above.posn[1] = (frame.posn[1] as f64 + pad as f64 + bar.size[1] as f64 + swatch_pad) as i32;
        if ctx.config.draw_nan_annotation {
            above.posn[1] = (above.posn[1] as f64 + swatch_pad + nan.size[1] as f64) as i32;
        }
        if ctx.config.draw_below_range_swatch {
            above.posn[1] = (above.posn[1] as f64 + swatch_pad + below.size[1] as f64) as i32;
        }
    } else {
        above.posn = bar.posn;
        above.posn[tl[1]] = (above.posn[tl[1]] as f64 + (frame.size[1] as f64 - size)) as i32;
        if ctx.config.draw_nan_annotation {
            // step back over the NaN swatch length at the far end
            above.posn[tl[1]] = (above.posn[tl[1]] as f64 - (nan.size[1] as f64 + swatch_pad)) as i32;
        }
    }
    above.size = [bar.size[0], padded_swatch_length(size, pad)];
    tracing::trace!(above_range = ?ctx.boxes.above_range, size, "laid out above-range swatch");
}
