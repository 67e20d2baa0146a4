//! Layout engine for scalar bar legends.
//!
//! A scalar bar is a color ramp framed by a title, tick labels, optional NaN and
//! out-of-range swatches and annotation labels with leader lines. Everything is
//! carved out of a single frame rectangle in a fixed order, so each stage reads
//! the boxes resolved by the stages before it:
//!
//! frame → bar thickness → swatches → title → bar length → ticks → annotations
//! → label placement → geometry.
//!
//! [`ScalarBarLayoutEngine`] drives the pipeline and retains the last good
//! layout. [`compute_layout`] runs a single pass without retaining anything.

pub mod annotations;
pub mod bar;
pub mod config;
pub mod context;
pub mod emit;
pub mod engine;
pub mod error;
pub mod format;
pub mod frame;
pub mod placement;
pub mod swatch;
pub mod ticks;
pub mod title;

pub use config::ScalarBarConfig;
pub use engine::{compute_layout, LayoutResult, ScalarBarLayoutEngine};
pub use error::{LayoutError, TextRole};
pub use frame::ViewportRect;
