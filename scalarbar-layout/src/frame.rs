#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use scalarbar_common::types::LayoutBox;

use crate::context::LayoutContext;

/// Largest frame or text extent, in pixels, that layout works with. Bigger
/// values are clamped so box arithmetic stays well inside `i32`.
pub const MAX_FRAME_EXTENT: i32 = 1 << 24;

/// Round a measured extent up to whole pixels, clamped to `0..=MAX_FRAME_EXTENT`
pub(crate) fn pixel_extent(measured: f64) -> i32 {
    measured.ceil().clamp(0.0, MAX_FRAME_EXTENT as f64) as i32
}

/// The viewport rectangle assigned to the scalar bar, as two pixel corners
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportRect {
    pub p0: [i32; 2],
    pub p1: [i32; 2],
}

impl ViewportRect {
    pub fn new(p0: [i32; 2], p1: [i32; 2]) -> Self {
        Self { p0, p1 }
    }

    /// Rectangle with its lower-left corner at `origin`
    pub fn from_origin_size(origin: [i32; 2], size: [i32; 2]) -> Self {
        Self {
            p0: origin,
            p1: [
                origin[0].saturating_add(size[0]),
                origin[1].saturating_add(size[1]),
            ],
        }
    }

    /// Screen `[width, height]` after applying the pixel caps
    pub fn capped_size(&self, max_width: i32, max_height: i32) -> [i32; 2] {
        [
            self.p1[0].saturating_sub(self.p0[0]).min(max_width),
            self.p1[1].saturating_sub(self.p0[1]).min(max_height),
        ]
    }
}

/// Origin and capped size of the frame when the layout was built, used to
/// tell whether a new viewport rectangle requires a rebuild
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSnapshot {
    pub origin: [i32; 2],
    pub size: [i32; 2],
}

impl FrameSnapshot {
    pub fn of(rect: &ViewportRect, max_width: i32, max_height: i32) -> Self {
        Self {
            origin: rect.p0,
            size: rect.capped_size(max_width, max_height),
        }
    }
}

/// Resolve the frame box from the viewport rectangle.
///
/// The frame always sits at the local origin. Its size is stored as
/// `(thickness, length)` so a horizontal bar swaps the screen axes.
pub(crate) fn compute_frame(ctx: &mut LayoutContext, rect: &ViewportRect) {
    let snapshot = FrameSnapshot::of(rect, ctx.config.max_width_px, ctx.config.max_height_px);
    let tl = ctx.tl;
    let size = snapshot.size.map(|s| s.clamp(0, MAX_FRAME_EXTENT));
    ctx.boxes.frame = LayoutBox::new([0, 0], [size[tl[0]], size[tl[1]]]);
    ctx.snapshot = snapshot;
    tracing::trace!(frame = ?ctx.boxes.frame, "resolved frame");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capped_size() {
        let rect = ViewportRect::new([10, 20], [210, 520]);
        assert_eq!(rect.capped_size(i32::MAX, i32::MAX), [200, 500]);
        assert_eq!(rect.capped_size(150, 300), [150, 300]);
    }

    #[test]
    fn test_snapshot_ignores_uncapped_growth() {
        let a = ViewportRect::from_origin_size([0, 0], [100, 400]);
        let b = ViewportRect::from_origin_size([0, 0], [100, 900]);
        assert_eq!(FrameSnapshot::of(&a, 100, 400), FrameSnapshot::of(&b, 100, 400));
        assert_ne!(
            FrameSnapshot::of(&a, i32::MAX, i32::MAX),
            FrameSnapshot::of(&b, i32::MAX, i32::MAX)
        );
    }
}
