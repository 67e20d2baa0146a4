//! Font size fitting.
//!
//! Font sizes are integral. The search finds the largest size whose measured
//! text fits inside a target box, clamped to `[MIN_FONT_SIZE, MAX_FONT_SIZE]`.

use crate::measurement::TextMeasurer;
use crate::types::TextProperty;

pub const MIN_FONT_SIZE: i32 = 2;
pub const MAX_FONT_SIZE: i32 = 100;

/// Result of fitting text into a target box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedFont {
    pub font_size: f32,
    /// Largest measured width at `font_size`
    pub width: f64,
    /// Largest measured height at `font_size`
    pub height: f64,
}

impl FittedFont {
    pub fn extent(&self) -> [f64; 2] {
        [self.width, self.height]
    }
}

/// Largest font size at which `text` fits in `target_width` x `target_height`
pub fn constrained_font_size<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    property: &TextProperty,
    target_width: i32,
    target_height: i32,
) -> FittedFont {
    fit_texts(
        measurer,
        std::slice::from_ref(&text),
        property,
        target_width,
        target_height,
    )
}

/// Largest font size at which every string in `texts` fits in the target box.
///
/// An empty set leaves the property's font size in place with zero extent.
pub fn constrained_font_size_for_set<M: TextMeasurer + ?Sized>(
    measurer: &M,
    texts: &[String],
    property: &TextProperty,
    target_width: i32,
    target_height: i32,
) -> FittedFont {
    let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
    fit_texts(measurer, &texts, property, target_width, target_height)
}

fn fit_texts<M: TextMeasurer + ?Sized>(
    measurer: &M,
    texts: &[&str],
    property: &TextProperty,
    target_width: i32,
    target_height: i32,
) -> FittedFont {
    if texts.is_empty() {
        return FittedFont {
            font_size: property.font_size,
            width: 0.0,
            height: 0.0,
        };
    }

    let fits = |size: i32| {
        let [w, h] = max_extent(measurer, texts, property, size as f32);
        w <= target_width as f64 && h <= target_height as f64
    };

    let size = if !fits(MIN_FONT_SIZE) {
        MIN_FONT_SIZE
    } else if fits(MAX_FONT_SIZE) {
        MAX_FONT_SIZE
    } else {
        // Invariant: lo fits, hi does not
        let (mut lo, mut hi) = (MIN_FONT_SIZE, MAX_FONT_SIZE);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if fits(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    };

    let [width, height] = max_extent(measurer, texts, property, size as f32);
    FittedFont {
        font_size: size as f32,
        width,
        height,
    }
}

fn max_extent<M: TextMeasurer + ?Sized>(
    measurer: &M,
    texts: &[&str],
    property: &TextProperty,
    font_size: f32,
) -> [f64; 2] {
    texts.iter().fold([0.0f64, 0.0f64], |acc, text| {
        let bounds = measurer.measure(text, property, font_size);
        [
            acc[0].max(bounds.width as f64),
            acc[1].max(bounds.height as f64),
        ]
    })
}
