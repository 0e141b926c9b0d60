#![forbid(unsafe_code)]

//! Interaction layer: turns pointer events into tree mutations.
//!
//! # Role in panesplit
//! A [`GestureController`] per leaf recognises corner press-and-drag
//! gestures and reports what should happen as a [`GestureDispatch`]. The
//! [`SplitView`] engine owns the [`PaneTree`](panesplit_layout::PaneTree),
//! routes events to the right controller or separator, applies the
//! requested splits, and relays cursor and repaint requests to a
//! [`PaneHost`].
//!
//! Everything is synchronous and single-threaded: one event in, one
//! dispatch out.

pub mod config;
pub mod gesture;
pub mod host;
pub mod overlay;
pub mod view;

pub use config::GestureConfig;
pub use gesture::{
    CaptureCommand, CornerAction, GestureController, GestureDispatch, GestureIgnoredReason,
    GesturePhase, GestureRequest, GestureState, OverlayCommand, corner_action,
};
pub use host::PaneHost;
pub use overlay::{HintOverlay, OverlayStyle, arrow_polygon};
pub use view::{SplitView, ViewCapture, ViewResponse};
