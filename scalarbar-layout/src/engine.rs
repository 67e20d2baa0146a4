//! Pipeline driver and the rebuild policy.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use scalarbar_colors::ColorSource;
use scalarbar_common::types::Orientation;
use scalarbar_text::measurement::TextMeasurer;

use crate::annotations::{self, AnnotationEditor, LabelMap};
use crate::config::ScalarBarConfig;
use crate::context::{LayoutBoxes, LayoutContext};
use crate::emit::{self, ScalarBarGeometry};
use crate::error::{LayoutError, TextRole};
use crate::frame::{self, FrameSnapshot, ViewportRect};
use crate::placement::{self, AnnotationLabel, LeaderLines};
use crate::ticks::{self, TickLabel};
use crate::{bar, swatch, title};

/// Everything one layout pass resolved
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub orientation: Orientation,
    /// Frame origin and capped size the layout was built for
    pub snapshot: FrameSnapshot,
    pub boxes: LayoutBoxes,
    pub swatch_pad: f64,
    pub title_font_size: f32,
    pub tick_labels: Vec<TickLabel>,
    pub tick_font_size: f32,
    /// Labels keyed by anchor coordinate, after the edit hook ran
    pub labels: LabelMap,
    pub annotations: Vec<AnnotationLabel>,
    pub leader_lines: LeaderLines,
    pub geometry: ScalarBarGeometry,
}

impl LayoutResult {
    /// Outlines of the main boxes, for overlaying on a rendered legend
    pub fn debug_outlines(&self) -> Vec<[[f64; 2]; 4]> {
        let tl = self.orientation.tl();
        let mut outlines = vec![
            self.boxes.scalar_bar.corners(tl),
            self.boxes.nan.corners(tl),
            self.boxes.title.corners(tl),
        ];
        if !self.tick_labels.is_empty() {
            outlines.push(self.boxes.ticks.corners(tl));
        }
        outlines
    }

    /// Viewport rectangle `[x, y, width, height]` of the color ramp for a
    /// frame whose lower-left corner is at `origin`
    pub fn scalar_bar_rect(&self, origin: [i32; 2]) -> [i32; 4] {
        let tl = self.orientation.tl();
        let bar = self.boxes.scalar_bar;
        [
            origin[0] + bar.posn[0],
            origin[1] + bar.posn[1],
            bar.size[tl[0]],
            bar.size[tl[1]],
        ]
    }
}

/// Run every layout stage for the frame `rect`.
///
/// Fails before any work is done when a text property is missing. All other
/// inputs degrade gracefully, so any frame yields some geometry.
#[tracing::instrument(skip_all)]
pub fn compute_layout(
    rect: &ViewportRect,
    config: &ScalarBarConfig,
    colors: &dyn ColorSource,
    measurer: &dyn TextMeasurer,
    editor: Option<&dyn AnnotationEditor>,
) -> Result<LayoutResult, LayoutError> {
    let title_property = config
        .title_text_property
        .as_ref()
        .ok_or(LayoutError::MissingTextProperty(TextRole::Title))?;
    let label_property = config
        .label_text_property
        .as_ref()
        .ok_or(LayoutError::MissingTextProperty(TextRole::Label))?;
    let annotation_property = config
        .annotation_text_property
        .as_ref()
        .ok_or(LayoutError::MissingTextProperty(TextRole::Annotation))?;

    let mut ctx = LayoutContext::new(
        config,
        colors,
        measurer,
        title_property,
        label_property,
        annotation_property,
    );

    frame::compute_frame(&mut ctx, rect);
    swatch::compute_scalar_bar_thickness(&mut ctx);
    swatch::compute_swatch_pad(&mut ctx);
    swatch::layout_nan_swatch(&mut ctx);
    swatch::layout_below_range_swatch(&mut ctx);
    swatch::layout_above_range_swatch(&mut ctx);
    title::prepare_title(&mut ctx);
    title::layout_title(&mut ctx);
    bar::compute_scalar_bar_length(&mut ctx);
    swatch::layout_above_range_swatch_posn(&mut ctx);
    ticks::layout_ticks(&mut ctx);
    annotations::layout_annotations(&mut ctx, editor);
    if config.unconstrained_font_size {
        ticks::layout_for_unconstrained_font(&mut ctx);
    }
    ctx.boxes = ctx.boxes.clamped();

    let (annotations, leader_lines) = placement::place_annotations(&ctx);
    let geometry = emit::emit_geometry(&ctx, &annotations, &leader_lines);

    tracing::debug!(
        orientation = ?ctx.orientation(),
        bar = ?ctx.boxes.scalar_bar,
        annotations = annotations.len(),
        "built scalar bar layout"
    );

    Ok(LayoutResult {
        orientation: ctx.orientation(),
        snapshot: ctx.snapshot,
        boxes: ctx.boxes,
        swatch_pad: ctx.swatch_pad,
        title_font_size: ctx.title.font_size,
        tick_labels: ctx.ticks,
        tick_font_size: ctx.tick_font_size,
        labels: ctx.labels,
        annotations,
        leader_lines,
        geometry,
    })
}

/// Inputs a retained layout was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BuildStamp {
    snapshot: FrameSnapshot,
    modified: u64,
}

/// Owns the inputs of one scalar bar and retains its last good layout.
///
/// Every mutation of the configuration, color source or edit hook advances a
/// modification counter, and [`rebuild_layout_if_needed`] only lays out again
/// when that counter or the capped frame moved since the last build.
///
/// [`rebuild_layout_if_needed`]: ScalarBarLayoutEngine::rebuild_layout_if_needed
pub struct ScalarBarLayoutEngine {
    config: ScalarBarConfig,
    colors: Option<Arc<dyn ColorSource>>,
    measurer: Arc<dyn TextMeasurer>,
    editor: Option<Arc<dyn AnnotationEditor>>,
    modified: u64,
    built: Option<BuildStamp>,
    layout: Option<LayoutResult>,
}

impl ScalarBarLayoutEngine {
    pub fn new(measurer: Arc<dyn TextMeasurer>) -> Self {
        Self {
            config: ScalarBarConfig::default(),
            colors: None,
            measurer,
            editor: None,
            modified: 0,
            built: None,
            layout: None,
        }
    }

    pub fn with_config(mut self, config: ScalarBarConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn with_color_source(mut self, colors: Arc<dyn ColorSource>) -> Self {
        self.set_color_source(colors);
        self
    }

    pub fn config(&self) -> &ScalarBarConfig {
        &self.config
    }

    /// Mutable access to the configuration. Marks the layout out of date.
    pub fn config_mut(&mut self) -> &mut ScalarBarConfig {
        self.modified += 1;
        &mut self.config
    }

    pub fn set_config(&mut self, config: ScalarBarConfig) {
        self.config = config;
        self.modified += 1;
    }

    pub fn color_source(&self) -> Option<&Arc<dyn ColorSource>> {
        self.colors.as_ref()
    }

    pub fn set_color_source(&mut self, colors: Arc<dyn ColorSource>) {
        self.colors = Some(colors);
        self.modified += 1;
    }

    pub fn set_annotation_editor(&mut self, editor: Option<Arc<dyn AnnotationEditor>>) {
        self.editor = editor;
        self.modified += 1;
    }

    /// The last successfully built layout
    pub fn layout(&self) -> Option<&LayoutResult> {
        self.layout.as_ref()
    }

    pub fn needs_rebuild(&self, rect: &ViewportRect) -> bool {
        let stamp = BuildStamp {
            snapshot: FrameSnapshot::of(rect, self.config.max_width_px, self.config.max_height_px),
            modified: self.modified,
        };
        self.layout.is_none() || self.built != Some(stamp)
    }

    /// Lay out for `rect` unconditionally.
    ///
    /// On error the previously retained layout is kept untouched.
    pub fn rebuild_layout(&mut self, rect: &ViewportRect) -> Result<&LayoutResult, LayoutError> {
        let colors = self
            .colors
            .as_deref()
            .ok_or(LayoutError::MissingColorSource)?;
        let result = compute_layout(
            rect,
            &self.config,
            colors,
            self.measurer.as_ref(),
            self.editor.as_deref(),
        )?;
        self.built = Some(BuildStamp {
            snapshot: result.snapshot,
            modified: self.modified,
        });
        Ok(self.layout.insert(result))
    }

    /// Lay out for `rect` only if something changed since the last build.
    ///
    /// Returns whether a new layout was built.
    pub fn rebuild_layout_if_needed(&mut self, rect: &ViewportRect) -> Result<bool, LayoutError> {
        if !self.needs_rebuild(rect) {
            tracing::trace!("scalar bar layout is up to date");
            return Ok(false);
        }
        self.rebuild_layout(rect)?;
        Ok(true)
    }
}
