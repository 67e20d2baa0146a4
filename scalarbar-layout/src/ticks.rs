//! Tick values, tick label fitting and the tick box.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::context::LayoutContext;
use crate::format::LabelFormat;
use crate::frame::pixel_extent;

/// A tick value and its formatted label
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub value: f64,
    pub text: String,
}

/// `count` values spread evenly over `range`, in log10 space for log scales.
///
/// A single tick sits at the middle of the range.
pub fn tick_values(range: (f64, f64), count: usize, log_scale: bool) -> Vec<f64> {
    let (lo, hi) = if log_scale {
        (range.0.log10(), range.1.log10())
    } else {
        range
    };
    (0..count)
        .map(|i| {
            let t = if count > 1 {
                i as f64 / (count - 1) as f64
            } else {
                0.5
            };
            let v = lo + t * (hi - lo);
            if log_scale {
                10f64.powf(v)
            } else {
                v
            }
        })
        .collect()
}

/// Generate tick labels, fit them to a common font size and reserve the tick box.
///
/// The color bar is shortened by the fitted label extent so the first and last
/// labels, which are centered on the bar ends, stay inside the frame.
pub(crate) fn layout_ticks(ctx: &mut LayoutContext) {
    let tl = ctx.tl;
    let pad = ctx.pad();
    let vertical = ctx.is_vertical();
    let precede = ctx.precede();

    if ctx.is_indexed() {
        ctx.ticks.clear();
        shift_past_below_range_swatch(ctx);
        return;
    }

    let count = ctx.config.number_of_labels();
    let format = LabelFormat::parse(&ctx.config.label_format);
    ctx.ticks = tick_values(ctx.colors.range(), count, ctx.colors.uses_log_scale())
        .into_iter()
        .map(|value| TickLabel {
            value,
            text: format.format(value),
        })
        .collect();

    if count == 0 {
        shift_past_below_range_swatch(ctx);
        return;
    }

    let frame = ctx.boxes.frame;
    let bar = ctx.boxes.scalar_bar;
    let title = ctx.boxes.title;
    let n = count as i32;
    let ticks = &mut ctx.boxes.ticks;
    ticks.posn = bar.posn;

    let (target_width, target_height) = if vertical {
        ticks.size[0] = frame.size[0] - bar.size[0] - 3 * pad;
        ticks.size[1] = frame.size[1]
            - title.size[1]
            - 3 * pad
            - ctx.config.vertical_title_separation();
        if ctx.config.draw_nan_annotation {
            ticks.size[1] = (ticks.size[1] as f64 - (ctx.boxes.nan.size[1] as f64 + ctx.swatch_pad)) as i32;
        }
        if ctx.config.draw_below_range_swatch {
            ticks.size[1] =
                (ticks.size[1] as f64 - (ctx.boxes.below_range.size[1] as f64 + ctx.swatch_pad)) as i32;
        }
        if ctx.config.draw_above_range_swatch {
            ticks.size[1] =
                (ticks.size[1] as f64 - (ctx.boxes.above_range.size[1] as f64 + ctx.swatch_pad)) as i32;
        }
        if precede {
            ticks.posn[0] = pad;
        } else {
            ticks.posn[0] += bar.size[0] + 2 * pad;
        }
        (ticks.size[0], (ticks.size[1] - pad * (n - 1)) / n)
    } else {
        ticks.size[1] = bar.size[1];
        ticks.size[0] = frame.size[0] - bar.size[0] - 4 * pad - title.size[0];
        if precede {
            ticks.posn[1] = title.size[0] + 2 * pad + title.posn[1];
        } else {
            ticks.posn[1] += bar.size[0];
        }
        ((ticks.size[1] - pad * (n - 1)) / n, ticks.size[0])
    };

    let texts: Vec<String> = ctx.ticks.iter().map(|t| t.text.clone()).collect();
    let label_size = if ctx.config.unconstrained_font_size {
        ctx.tick_font_size = ctx.label_property.font_size;
        [0, 0]
    } else {
        let fitted = ctx.measurer.constrained_font_size_for_set(
            &texts,
            ctx.label_property,
            target_width,
            target_height,
        );
        ctx.tick_font_size = fitted.font_size;
        [pixel_extent(fitted.width), pixel_extent(fitted.height)]
    };

    let half = label_size[tl[1]] as f64 / 2.0;
    let bar = &mut ctx.boxes.scalar_bar;
    bar.posn[tl[1]] = (bar.posn[tl[1]] as f64 + half) as i32;
    bar.size[1] -= label_size[tl[1]];
    let ticks = &mut ctx.boxes.ticks;
    ticks.posn[tl[1]] = (ticks.posn[tl[1]] as f64 + half) as i32;
    ticks.size[1] -= label_size[tl[1]];

    if !vertical {
        shift_past_below_range_swatch(ctx);
        let ticks = &mut ctx.boxes.ticks;
        ticks.posn[1] += pad * if precede { -1 } else { 1 };
        ticks.size[1] -= pad;
    }

    tracing::debug!(
        ticks = ?ctx.boxes.ticks,
        bar = ?ctx.boxes.scalar_bar,
        count,
        font_size = ctx.tick_font_size,
        "laid out tick labels"
    );
}

/// On a horizontal bar the below-range swatch occupies the start of the long
/// axis, so the ramp and tick box begin after it.
fn shift_past_below_range_swatch(ctx: &mut LayoutContext) {
    if ctx.is_vertical() {
        return;
    }
    let shift = ctx.below_swatch_size as i32;
    ctx.boxes.scalar_bar.posn[0] += shift;
    ctx.boxes.ticks.posn[0] += shift;
}

/// Rework the tick and title boxes around the measured labels when fonts are
/// used at their nominal size.
pub(crate) fn layout_for_unconstrained_font(ctx: &mut LayoutContext) {
    let tl = ctx.tl;
    let (mut label_width, mut label_height) = (0i32, 0i32);
    for tick in &ctx.ticks {
        let bounds = ctx
            .measurer
            .measure(&tick.text, ctx.label_property, ctx.tick_font_size);
        label_width = label_width.max(pixel_extent((bounds.width as f64).trunc()));
        label_height = label_height.max(pixel_extent((bounds.height as f64).trunc()));
    }

    let frame = ctx.boxes.frame;
    let bar = ctx.boxes.scalar_bar;
    if ctx.is_vertical() {
        let title = &mut ctx.boxes.title;
        title.posn[1] = (title.posn[1] as f64 + label_height as f64 * 0.75) as i32;
        let ticks = &mut ctx.boxes.ticks;
        ticks.size[0] = label_width;
        if ctx.config.text_position.is_precede() {
            ticks.posn[0] = (-label_width as f64 + frame.size[0] as f64 - bar.size[0] as f64
                - label_width as f64 * 0.05) as i32;
        }
    } else {
        let title = &mut ctx.boxes.title;
        title.posn[1] = if ctx.config.text_position.is_precede() {
            frame.posn[1] + bar.posn[1] - title.size[tl[1]] - label_height
        } else {
            frame.posn[1] + bar.size[tl[1]] + label_height
        };
    }
    tracing::debug!(
        label_width,
        label_height,
        title = ?ctx.boxes.title,
        ticks = ?ctx.boxes.ticks,
        "relaid title and ticks for unconstrained fonts"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_linear_ticks() {
        assert_eq!(tick_values((0.0, 1.0), 5, false), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(tick_values((2.0, 4.0), 1, false), vec![3.0]);
        assert!(tick_values((2.0, 4.0), 0, false).is_empty());
    }

    #[test]
    fn test_log_ticks() {
        let values = tick_values((1.0, 10000.0), 5, true);
        for (v, expected) in values.iter().zip([1.0, 10.0, 100.0, 1000.0, 10000.0]) {
            assert_approx_eq!(f64, *v, expected, epsilon = 1e-9);
        }
        assert_approx_eq!(f64, tick_values((1.0, 100.0), 1, true)[0], 10.0, epsilon = 1e-12);
    }
}
