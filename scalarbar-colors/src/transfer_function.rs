use crate::error::ColorError;
use crate::source::{ColorSource, OutOfRangeColors, NAN_COLOR_INDEX};
use palette::{Mix, Srgba};
use scalarbar_common::types::Rgba;
use scalarbar_common::value::{AnnotatedValue, Annotation};

/// Piecewise linear color function over scalar nodes.
///
/// Colors between nodes are mixed in sRGB space. Values outside the node range
/// take the color of the nearest end node. Out-of-range swatches use the
/// separate below- and above-range colors, which default to black.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTransferFunction {
    nodes: Vec<(f64, Srgba)>,
    log_scale: bool,
    nan_color: Rgba,
    below_range_color: Rgba,
    above_range_color: Rgba,
    annotations: Vec<Annotation>,
}

impl ColorTransferFunction {
    pub fn try_new(nodes: Vec<(f64, Rgba)>) -> Result<Self, ColorError> {
        if nodes.is_empty() {
            return Err(ColorError::EmptyTransferFunction);
        }
        let mut nodes: Vec<(f64, Srgba)> = nodes
            .into_iter()
            .map(|(x, c)| (x, Srgba::from_components((c[0], c[1], c[2], c[3]))))
            .collect();
        if let Some((x, _)) = nodes.iter().find(|(x, _)| !x.is_finite()) {
            return Err(ColorError::InvalidRange { lo: *x, hi: *x });
        }
        nodes.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self {
            nodes,
            log_scale: false,
            nan_color: [0.5, 0.0, 0.0, 1.0],
            below_range_color: [0.0, 0.0, 0.0, 1.0],
            above_range_color: [0.0, 0.0, 0.0, 1.0],
            annotations: Vec::new(),
        })
    }

    pub fn with_log_scale(mut self, log_scale: bool) -> Result<Self, ColorError> {
        let (lo, hi) = self.range();
        if log_scale && lo <= 0.0 {
            return Err(ColorError::NonPositiveLogRange { lo, hi });
        }
        self.log_scale = log_scale;
        Ok(self)
    }

    pub fn with_nan_color(mut self, color: Rgba) -> Self {
        self.nan_color = color;
        self
    }

    pub fn with_below_range_color(mut self, color: Rgba) -> Self {
        self.below_range_color = color;
        self
    }

    pub fn with_above_range_color(mut self, color: Rgba) -> Self {
        self.above_range_color = color;
        self
    }

    pub fn with_annotation(
        mut self,
        value: impl Into<AnnotatedValue>,
        label: impl Into<String>,
    ) -> Self {
        self.annotations.push(Annotation::new(value, label));
        self
    }

    fn to_rgba(color: Srgba) -> Rgba {
        let (r, g, b, a) = color.into_components();
        [r, g, b, a]
    }
}

impl ColorSource for ColorTransferFunction {
    fn color(&self, value: f64) -> Rgba {
        if value.is_nan() {
            return self.nan_color;
        }
        let first = self.nodes[0];
        let last = self.nodes[self.nodes.len() - 1];
        if value <= first.0 {
            return Self::to_rgba(first.1);
        }
        if value >= last.0 {
            return Self::to_rgba(last.1);
        }
        // value lies strictly inside the node range, so a bracketing pair exists
        let upper = self.nodes.partition_point(|(x, _)| *x <= value);
        let (x0, c0) = self.nodes[upper - 1];
        let (x1, c1) = self.nodes[upper];
        let t = if self.log_scale {
            (value.log10() - x0.log10()) / (x1.log10() - x0.log10())
        } else {
            (value - x0) / (x1 - x0)
        };
        Self::to_rgba(c0.mix(c1, t as f32))
    }

    fn indexed_color(&self, index: i64) -> Rgba {
        if index == NAN_COLOR_INDEX || index < 0 {
            return self.nan_color;
        }
        Self::to_rgba(self.nodes[index as usize % self.nodes.len()].1)
    }

    fn range(&self) -> (f64, f64) {
        (self.nodes[0].0, self.nodes[self.nodes.len() - 1].0)
    }

    fn uses_log_scale(&self) -> bool {
        self.log_scale
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn annotation_color(&self, value: &AnnotatedValue) -> Rgba {
        match value.to_f64() {
            Some(v) => self.color(v),
            None => self.nan_color,
        }
    }

    fn number_of_available_colors(&self) -> usize {
        self.nodes.len()
    }

    fn out_of_range_colors(&self) -> Option<&dyn OutOfRangeColors> {
        Some(self)
    }
}

impl OutOfRangeColors for ColorTransferFunction {
    fn below_range_color(&self) -> Rgba {
        self.below_range_color
    }

    fn above_range_color(&self) -> Rgba {
        self.above_range_color
    }
}
