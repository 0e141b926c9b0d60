#![forbid(unsafe_code)]

//! panesplit public facade crate.
//!
//! Re-exports the types an embedding application needs from the internal
//! crates and offers a prelude for day-to-day usage. Most hosts only touch
//! [`SplitView`], [`PaneHost`], [`Payload`], and [`PaneEvent`].

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use panesplit_core::cursor::CursorShape;
pub use panesplit_core::event::{PaneEvent, PointerButton, PointerButtons};
pub use panesplit_core::geometry::{Point, Polygon, Rect};
pub use panesplit_core::surface::{RenderSurface, Rgba};

// --- Layout re-exports -----------------------------------------------------

pub use panesplit_layout::{
    ConfigError, Corner, DragDirection, PaneError, PaneId, PaneNode, PaneTree, Payload, Separator,
    Slot, SplitAxis, SplitConfig, SplitOutcome, UnsplitOutcome, classify_drag, corner_regions,
};

// --- Interaction re-exports ------------------------------------------------

pub use panesplit_interaction::{
    GestureConfig, GestureController, GestureDispatch, GestureRequest, HintOverlay,
    OverlayStyle, PaneHost, SplitView, ViewCapture, ViewResponse,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for panesplit embedders.
#[derive(Debug)]
pub enum Error {
    /// A structural tree operation was rejected.
    Pane(PaneError),
    /// Settings failed validation.
    Config(ConfigError),
    /// I/O failure in the embedding host.
    Io(std::io::Error),
}

impl Error {
    /// Whether the failure only means a gesture raced itself and can be
    /// dropped without telling the user.
    #[must_use]
    pub fn is_benign(&self) -> bool {
        match self {
            Self::Pane(err) => err.is_benign(),
            Self::Config(_) | Self::Io(_) => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pane(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pane(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<PaneError> for Error {
    fn from(err: PaneError) -> Self {
        Self::Pane(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for panesplit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CursorShape, Error, GestureConfig, PaneEvent, PaneHost, PaneId, Payload, Point,
        PointerButton, PointerButtons, Rect, RenderSurface, Result, Rgba, SplitAxis, SplitConfig,
        SplitView,
    };

    pub use crate::{core, interaction, layout};
}

pub use panesplit_core as core;
pub use panesplit_interaction as interaction;
pub use panesplit_layout as layout;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pane_errors_convert_and_keep_benign_flag() {
        let err: Error = PaneError::NotSplit { node: PaneId::MIN }.into();
        assert!(err.is_benign());
        assert!(std::error::Error::source(&err).is_some());

        let err: Error = PaneError::UnknownPane { node: PaneId::MIN }.into();
        assert!(!err.is_benign());
    }

    #[test]
    fn config_errors_convert() {
        let err: Error = ConfigError::ZeroCornerSize.into();
        assert!(!err.is_benign());
        assert_eq!(err.to_string(), ConfigError::ZeroCornerSize.to_string());
    }

    struct Blank;

    impl Payload for Blank {
        fn render(&self, _surface: &mut dyn RenderSurface, _rect: Rect) {}
        fn on_layout_changed(&mut self, _rect: Rect) {}
    }

    #[test]
    fn question_mark_lifts_both_error_kinds() {
        fn build(fraction: f64) -> Result<usize> {
            let config = SplitConfig::new(fraction, 0.01, 0, 1)?;
            let mut tree = PaneTree::with_config(Rect::from_size(10, 10), Blank, config)?;
            tree.split(PaneId::MIN, SplitAxis::Vertical, 0, Blank)?;
            tree.clear_split_guards();
            tree.split(PaneId::MIN, SplitAxis::Vertical, 0, Blank)?;
            Ok(tree.leaf_count())
        }
        assert!(matches!(build(0.5), Err(Error::Pane(PaneError::NotLeaf { .. }))));
        assert!(matches!(build(2.0), Err(Error::Config(_))));
    }
}
