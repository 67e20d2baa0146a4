use scalarbar_common::types::Rgba;
use scalarbar_common::value::{AnnotatedValue, Annotation};
use std::fmt::Debug;

/// Index passed to [`ColorSource::indexed_color`] to request the NaN color
pub const NAN_COLOR_INDEX: i64 = -1;

/// Maps scalar values and category indices to colors.
///
/// This is the only view the layout engine has of a lookup table.
pub trait ColorSource: Debug + Send + Sync {
    /// Color for a scalar value on the continuous ramp
    fn color(&self, value: f64) -> Rgba;

    /// Overall opacity applied by the source, in `[0, 1]`
    fn opacity(&self) -> f32 {
        1.0
    }

    /// Color of category `index`. `NAN_COLOR_INDEX` yields the NaN color.
    fn indexed_color(&self, index: i64) -> Rgba;

    /// The `(lo, hi)` scalar range covered by the ramp
    fn range(&self) -> (f64, f64);

    /// Whether values are categories rather than points on a continuous ramp
    fn is_indexed_lookup(&self) -> bool {
        false
    }

    fn uses_log_scale(&self) -> bool {
        false
    }

    /// Annotated values in table order
    fn annotations(&self) -> &[Annotation] {
        &[]
    }

    /// Color drawn for an annotated value
    fn annotation_color(&self, value: &AnnotatedValue) -> Rgba;

    /// Number of distinct colors the source can produce for indexed lookups
    fn number_of_available_colors(&self) -> usize;

    /// Out-of-range colors, for sources that have them
    fn out_of_range_colors(&self) -> Option<&dyn OutOfRangeColors> {
        None
    }
}

/// Optional capability of sources that color values outside their range
pub trait OutOfRangeColors {
    fn below_range_color(&self) -> Rgba;
    fn above_range_color(&self) -> Rgba;
}
