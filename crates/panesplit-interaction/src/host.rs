#![forbid(unsafe_code)]

//! What the engine needs from the surface that hosts it.

use panesplit_core::cursor::CursorShape;
use panesplit_core::event::PointerButtons;
use panesplit_core::geometry::{Point, Rect};

/// Host surface contract.
///
/// The engine never draws directly. It asks the host to repaint regions
/// and to change the pointer shape, and it polls the pointer when it needs
/// to re-derive hover state after the layout changed under a stationary
/// pointer.
pub trait PaneHost {
    /// Current pointer position in surface coordinates, if known.
    fn pointer_position(&self) -> Option<Point>;

    /// Buttons currently held.
    fn pointer_buttons(&self) -> PointerButtons;

    /// Schedule a repaint of `rect`.
    fn request_repaint(&mut self, rect: Rect);

    /// Change the displayed pointer shape.
    fn set_cursor_shape(&mut self, shape: CursorShape);
}
