#![forbid(unsafe_code)]

//! Core: geometry primitives, pointer events, and host-facing contracts.
//!
//! # Role in panesplit
//! `panesplit-core` is the vocabulary shared by every other crate. It owns
//! the integer geometry used for hit testing and layout, the normalized
//! pointer event stream a host feeds into the engine, and the minimal
//! drawing contract ([`RenderSurface`]) that payloads and overlays paint
//! into.
//!
//! # How it fits in the system
//! `panesplit-layout` builds the pane tree on top of [`Rect`] and
//! [`Polygon`]; `panesplit-interaction` consumes [`PaneEvent`] values and
//! reports [`CursorShape`] changes back to the host. Nothing here allocates
//! per event or keeps state.

pub mod cursor;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod surface;

pub use cursor::CursorShape;
pub use event::{PaneEvent, PointerButton, PointerButtons};
pub use geometry::{Point, Polygon, QuarterTurn, Rect, Sides};
pub use surface::{RenderSurface, Rgba};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
