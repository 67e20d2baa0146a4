use crate::context::LayoutContext;

/// Length of the color ramp once the title and swatches are carved out.
///
/// Padding is only inserted between swatches that are drawn, so the
/// above-range swatch only pays for a pad when a NaN swatch precedes it.
pub(crate) fn compute_scalar_bar_length(ctx: &mut LayoutContext) {
    let frame = ctx.boxes.frame;
    let mut length = if ctx.is_vertical() {
        frame.size[1] - ctx.boxes.title.size[1] - ctx.config.vertical_title_separation()
    } else {
        frame.size[1]
    };

    length = (length as f64 - (ctx.nan_swatch_size + ctx.swatch_pad)) as i32;

    if ctx.below_swatch_size > 0.0 {
        length = (length as f64 - (ctx.below_swatch_size + ctx.swatch_pad)) as i32;
    }

    if ctx.above_swatch_size > 0.0 {
        length = (length as f64 - ctx.above_swatch_size) as i32;
        if ctx.nan_swatch_size > 0.0 {
            length = (length as f64 - ctx.swatch_pad) as i32;
        }
    }

    ctx.boxes.scalar_bar.size[1] = length;
    tracing::trace!(length, "resolved color bar length");
}
