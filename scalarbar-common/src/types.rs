#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::VariantNames;

/// Floating point RGBA color with components in `[0, 1]`
pub type Rgba = [f32; 4];

/// 8-bit RGB color, used for leader lines
pub type Rgb8 = [u8; 3];

/// 8-bit RGBA color, used for filled swatches
pub type Rgba8 = [u8; 4];

/// Convert a floating point color to 8-bit RGB, truncating each channel
pub fn to_rgb8(color: &Rgba) -> Rgb8 {
    [
        channel_to_u8(color[0]),
        channel_to_u8(color[1]),
        channel_to_u8(color[2]),
    ]
}

/// Convert a floating point color to 8-bit RGBA.
///
/// When `use_opacity` is false the alpha channel is forced to fully opaque.
pub fn to_rgba8(color: &Rgba, use_opacity: bool) -> Rgba8 {
    [
        channel_to_u8(color[0]),
        channel_to_u8(color[1]),
        channel_to_u8(color[2]),
        if use_opacity {
            channel_to_u8(color[3])
        } else {
            255
        },
    ]
}

fn channel_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0) as u8
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    /// Permutation mapping `(thickness, length)` indices onto screen `(x, y)` axes.
    ///
    /// `size[tl[i]]` is the screen extent along axis `i`, and `posn[tl[0]]` is the
    /// screen coordinate measured across the bar.
    pub fn tl(&self) -> [usize; 2] {
        match self {
            Orientation::Vertical => [0, 1],
            Orientation::Horizontal => [1, 0],
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

/// Placement of tick labels and title relative to the color bar.
///
/// Annotations are always drawn on the opposite side from tick labels.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TextPosition {
    /// Ticks left of a vertical bar, below a horizontal bar
    PrecedeScalarBar,
    /// Ticks right of a vertical bar, above a horizontal bar
    #[default]
    SucceedScalarBar,
}

impl TextPosition {
    pub fn is_precede(&self) -> bool {
        matches!(self, TextPosition::PrecedeScalarBar)
    }
}

/// An axis-aligned box in frame-local pixel coordinates.
///
/// `posn` is a screen `(x, y)` position (y grows upward), while `size` is stored as
/// `(thickness, length)` relative to the bar's long axis. Use [`Orientation::tl`] to
/// move between the two.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutBox {
    pub posn: [i32; 2],
    pub size: [i32; 2],
}

impl LayoutBox {
    pub const ZERO: LayoutBox = LayoutBox {
        posn: [0, 0],
        size: [0, 0],
    };

    pub fn new(posn: [i32; 2], size: [i32; 2]) -> Self {
        Self { posn, size }
    }

    pub fn thickness(&self) -> i32 {
        self.size[0]
    }

    pub fn length(&self) -> i32 {
        self.size[1]
    }

    /// A box with a zero (or negative) extent marks a disabled feature
    pub fn is_empty(&self) -> bool {
        self.size[0] <= 0 || self.size[1] <= 0
    }

    /// Screen-space `[width, height]`
    pub fn extent(&self, tl: [usize; 2]) -> [i32; 2] {
        [self.size[tl[0]], self.size[tl[1]]]
    }

    /// Same box with negative sizes clamped to zero
    pub fn clamped(self) -> Self {
        Self {
            posn: self.posn,
            size: [self.size[0].max(0), self.size[1].max(0)],
        }
    }

    /// Screen-space corners, counter-clockwise from the lower-left
    pub fn corners(&self, tl: [usize; 2]) -> [[f64; 2]; 4] {
        let [w, h] = self.extent(tl);
        let x0 = self.posn[0] as f64;
        let y0 = self.posn[1] as f64;
        let x1 = x0 + w as f64;
        let y1 = y0 + h as f64;
        [[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
    }
}
