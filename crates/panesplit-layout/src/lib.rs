#![forbid(unsafe_code)]

//! Pane layout: the recursive split tree and the geometry around it.
//!
//! # Role in panesplit
//! `panesplit-layout` owns every structural decision: which panes exist, how
//! the surface is partitioned between them, where their corner hot-spots
//! sit, and how separators translate pointer motion into split ratios. It is
//! host-agnostic and has no notion of an event loop; `panesplit-interaction`
//! drives it.
//!
//! # Primary pieces
//! - [`corner`]: corner hit regions and drag-direction classification.
//! - [`PaneTree`] / [`PaneNode`]: owned binary tree with split/unsplit/resize.
//! - [`Separator`]: the draggable boundary of an internal node.
//! - [`SplitConfig`]: sizing policy (new-pane share, minimum share, handle).

pub mod config;
pub mod corner;
pub mod error;
pub mod pane;
pub mod payload;
pub mod separator;

pub use config::{ConfigError, DEFAULT_MIN_PANE_FRACTION, DEFAULT_NEW_PANE_FRACTION, SplitConfig};
pub use corner::{
    Corner, CornerRegions, DEFAULT_CORNER_SIZE, DragDirection, MIN_EFFECTIVE_CORNER_SIZE,
    classify_drag, corner_regions,
};
pub use error::{InvariantViolation, PaneError};
pub use pane::{PaneId, PaneNode, PaneTree, Slot, SplitAxis, SplitOutcome, UnsplitOutcome};
pub use panesplit_core::geometry::{Point, Polygon, Rect};
pub use payload::Payload;
pub use separator::Separator;
