#![forbid(unsafe_code)]

//! Canonical pointer and geometry events fed into the pane engine.
//!
//! Hosts translate their native input (terminal mouse reports, windowing
//! system callbacks, browser pointer events) into [`PaneEvent`] values.
//! All positions are surface coordinates: the same space as the root
//! [`Rect`] handed to the layout.
//!
//! # Design Notes
//!
//! - Terminals do not report hover enter/leave per pane. The engine
//!   synthesizes per-pane enter/leave from [`PaneEvent::HoverMove`], so a
//!   host only needs to send [`PaneEvent::HoverLeave`] when the pointer
//!   leaves the whole surface (or focus is lost).
//! - `Moved` carries the buttons held at the time of the move, mirroring
//!   drag reports from terminals.

use bitflags::bitflags;

use crate::geometry::{Point, Rect};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left (primary) button.
    Left,
    /// Right (secondary) button.
    Right,
    /// Middle button.
    Middle,
}

bitflags! {
    /// Set of pointer buttons currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// No buttons.
        const NONE   = 0b000;
        /// Left button.
        const LEFT   = 0b001;
        /// Right button.
        const RIGHT  = 0b010;
        /// Middle button.
        const MIDDLE = 0b100;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<PointerButton> for PointerButtons {
    fn from(button: PointerButton) -> Self {
        match button {
            PointerButton::Left => Self::LEFT,
            PointerButton::Right => Self::RIGHT,
            PointerButton::Middle => Self::MIDDLE,
        }
    }
}

impl PointerButtons {
    /// Whether `button` is held.
    #[must_use]
    pub fn holds(self, button: PointerButton) -> bool {
        self.contains(Self::from(button))
    }
}

/// Input events understood by the pane engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneEvent {
    /// Pointer entered the surface.
    HoverEnter(Point),
    /// Pointer moved without the engine tracking a press.
    HoverMove(Point),
    /// Pointer left the surface.
    HoverLeave,
    /// A button went down.
    Pressed {
        /// Pointer position.
        position: Point,
        /// Button pressed.
        button: PointerButton,
    },
    /// Pointer moved; `buttons` lists what is held.
    Moved {
        /// Pointer position.
        position: Point,
        /// Buttons held during the move.
        buttons: PointerButtons,
    },
    /// A button went up.
    Released {
        /// Pointer position.
        position: Point,
        /// Button released.
        button: PointerButton,
    },
    /// The owning surface was resized.
    Resized(Rect),
}

impl PaneEvent {
    /// Pointer position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match *self {
            Self::HoverEnter(position)
            | Self::HoverMove(position)
            | Self::Pressed { position, .. }
            | Self::Moved { position, .. }
            | Self::Released { position, .. } => Some(position),
            Self::HoverLeave | Self::Resized(_) => None,
        }
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
mod crossterm_compat {
    use super::{PaneEvent, PointerButton, PointerButtons};
    use crate::geometry::{Point, Rect};
    use crossterm::event as cte;

    impl PaneEvent {
        /// Convert a crossterm event into a pane event.
        ///
        /// Keyboard, paste, and scroll input is not part of the pane
        /// vocabulary and maps to `None`. Focus loss maps to
        /// [`PaneEvent::HoverLeave`] so an in-flight gesture is cancelled.
        #[must_use]
        pub fn from_crossterm(event: &cte::Event) -> Option<Self> {
            match event {
                cte::Event::Mouse(mouse) => Self::from_crossterm_mouse(mouse),
                cte::Event::Resize(width, height) => {
                    Some(Self::Resized(Rect::from_size(*width, *height)))
                }
                cte::Event::FocusLost => Some(Self::HoverLeave),
                _ => None,
            }
        }

        fn from_crossterm_mouse(mouse: &cte::MouseEvent) -> Option<Self> {
            let position = Point::from((mouse.column, mouse.row));
            match mouse.kind {
                cte::MouseEventKind::Down(button) => Some(Self::Pressed {
                    position,
                    button: convert_button(button),
                }),
                cte::MouseEventKind::Up(button) => Some(Self::Released {
                    position,
                    button: convert_button(button),
                }),
                cte::MouseEventKind::Drag(button) => Some(Self::Moved {
                    position,
                    buttons: PointerButtons::from(convert_button(button)),
                }),
                cte::MouseEventKind::Moved => Some(Self::HoverMove(position)),
                _ => None,
            }
        }
    }

    fn convert_button(button: cte::MouseButton) -> PointerButton {
        match button {
            cte::MouseButton::Left => PointerButton::Left,
            cte::MouseButton::Right => PointerButton::Right,
            cte::MouseButton::Middle => PointerButton::Middle,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_default_is_empty() {
        assert_eq!(PointerButtons::default(), PointerButtons::NONE);
        assert!(!PointerButtons::default().holds(PointerButton::Left));
    }

    #[test]
    fn holds_checks_single_button() {
        let held = PointerButtons::LEFT | PointerButtons::MIDDLE;
        assert!(held.holds(PointerButton::Left));
        assert!(held.holds(PointerButton::Middle));
        assert!(!held.holds(PointerButton::Right));
    }

    #[test]
    fn position_is_absent_for_leave_and_resize() {
        assert_eq!(PaneEvent::HoverLeave.position(), None);
        assert_eq!(PaneEvent::Resized(Rect::from_size(10, 10)).position(), None);
        let press = PaneEvent::Pressed {
            position: Point::new(3, 4),
            button: PointerButton::Left,
        };
        assert_eq!(press.position(), Some(Point::new(3, 4)));
    }
}
