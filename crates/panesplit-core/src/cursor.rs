#![forbid(unsafe_code)]

//! Pointer affordances requested from the host.

/// Cursor shape the engine asks the host to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// Platform default arrow.
    #[default]
    Default,
    /// Resize cross shown while a pane corner is hovered.
    Cross,
    /// Column-resize cursor for a side-by-side separator.
    SplitHorizontal,
    /// Row-resize cursor for a stacked separator.
    SplitVertical,
}
