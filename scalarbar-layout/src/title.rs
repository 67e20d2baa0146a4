use scalarbar_common::types::LayoutBox;

use crate::context::LayoutContext;
use crate::frame::{pixel_extent, MAX_FRAME_EXTENT};

pub(crate) fn prepare_title(ctx: &mut LayoutContext) {
    ctx.title.text = ctx.config.full_title();
}

/// Fit the title into the frame and pin it to the far edge.
///
/// The title spans the frame thickness. A vertical or indexed bar gives it up
/// to half the frame length; otherwise it shares the space beside the bar with
/// the tick labels according to `title_ratio`.
pub(crate) fn layout_title(ctx: &mut LayoutContext) {
    if ctx.config.title.is_empty() {
        ctx.boxes.title = LayoutBox::ZERO;
        ctx.title.font_size = ctx.title_property.font_size;
        return;
    }

    let tl = ctx.tl;
    let pad = ctx.pad();
    let frame = ctx.boxes.frame;
    let bar = ctx.boxes.scalar_bar;
    let vertical = ctx.is_vertical();

    let target_width = frame.size[tl[0]] - 2 * pad;
    let target_height = if vertical || ctx.is_indexed() {
        (frame.size[tl[1]] as f64 / 2.0 - pad as f64).ceil() as i32
    } else {
        let beside = frame.size[0]
            - bar.size[0]
            - if ctx.precede() { 0 } else { bar.posn[tl[0]] }
            - pad;
        (beside as f64 * ctx.config.title_ratio()) as i32
    };

    ctx.title.font_size = if ctx.config.unconstrained_font_size {
        ctx.title_property.font_size
    } else {
        ctx.measurer
            .constrained_font_size(&ctx.title.text, ctx.title_property, target_width, target_height)
            .font_size
    };

    let bounds = ctx
        .measurer
        .measure(&ctx.title.text, ctx.title_property, ctx.title.font_size);
    let measured = [bounds.width as f64, bounds.height as f64]
        .map(|m| m.min(MAX_FRAME_EXTENT as f64));

    let title = &mut ctx.boxes.title;
    for i in 0..2 {
        title.size[tl[i]] = pixel_extent(measured[i]);
    }
    title.posn[0] = (frame.posn[0] as f64 + (frame.size[tl[0]] as f64 - measured[0]) / 2.0) as i32;
    title.posn[1] = frame.posn[1] + frame.size[tl[1]];
    if vertical || !ctx.config.text_position.is_precede() {
        title.posn[1] -= title.size[tl[1]] + pad + ctx.config.frame_line_width();
    } else {
        title.posn[1] = frame.posn[1] + pad - ctx.config.frame_line_width();
    }

    tracing::debug!(
        title = ?ctx.boxes.title,
        font_size = ctx.title.font_size,
        target_width,
        target_height,
        "laid out title"
    );
}
