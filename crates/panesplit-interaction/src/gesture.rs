#![forbid(unsafe_code)]

//! Per-pane corner gesture recognizer.
//!
//! # State Machine
//!
//! ```text
//!            hover in corner                 press (activation button)
//!   Idle ───────────────────▶ Hovering ─────────────────────────────▶ Pressed
//!    ▲                           │                                      │
//!    │      leave / move out     │                move: classify drag   │
//!    ◀───────────────────────────┘         ┌────────────────────────────┤
//!    │                                     ▼                            ▼
//!    │                              Split requested             Unsplit hint shown
//!    │                              (once per press)            (overlay active)
//!    │                                     │                            │
//!    └───────── release / leave / other button / cancel ◀───────────────┘
//! ```
//!
//! While a press is active the controller holds the pointer: every move is
//! consumed regardless of where the pointer is. A recognised split is
//! reported once; later moves in the same press are swallowed. The hint
//! overlay is dropped on every path out of the press.
//!
//! The controller never touches the tree. It returns a [`GestureDispatch`]
//! describing the request, cursor change, overlay change, and capture
//! change, and the owner applies it.

use panesplit_core::cursor::CursorShape;
use panesplit_core::event::{PaneEvent, PointerButton, PointerButtons};
use panesplit_core::geometry::{Point, Rect};
use panesplit_core::logging::debug;
use panesplit_layout::{Corner, CornerRegions, DragDirection, SplitAxis, classify_drag, corner_regions};

use crate::config::GestureConfig;
use crate::overlay::{HintOverlay, OverlayStyle};

/// Recognizer state visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureState {
    /// Corner under the pointer, refreshed on hover and press.
    pub hovered_corner: Option<Corner>,
    /// Press position; set only while a corner press is active.
    pub drag_origin: Option<Point>,
    pub pressed: bool,
}

/// What a corner drag in a given direction should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerAction {
    /// Split the pane; the new pane goes into slot `index`.
    Split { axis: SplitAxis, index: usize },
    /// Show the collapse hint without mutating anything.
    UnsplitHint,
    Ignore,
}

/// Fixed corner/direction action table.
///
/// Dragging inward from a corner splits toward the drag; dragging outward
/// from the top-left corner offers to collapse the pane.
#[must_use]
pub const fn corner_action(corner: Corner, direction: DragDirection) -> CornerAction {
    use CornerAction::{Ignore, Split, UnsplitHint};
    use DragDirection::{Down, Left, Right, Up};
    use SplitAxis::{Horizontal, Vertical};
    match (corner, direction) {
        (Corner::TopLeft, Right) => Split {
            axis: Horizontal,
            index: 0,
        },
        (Corner::TopLeft, Down) => Split {
            axis: Vertical,
            index: 0,
        },
        (Corner::TopLeft, Left | Up) => UnsplitHint,
        (Corner::TopRight, Down) => Split {
            axis: Vertical,
            index: 0,
        },
        (Corner::TopRight, Left) => Split {
            axis: Horizontal,
            index: 1,
        },
        (Corner::BottomLeft, Right) => Split {
            axis: Horizontal,
            index: 0,
        },
        (Corner::BottomLeft, Up) => Split {
            axis: Vertical,
            index: 1,
        },
        (Corner::BottomRight, Left) => Split {
            axis: Horizontal,
            index: 1,
        },
        (Corner::BottomRight, Up) => Split {
            axis: Vertical,
            index: 1,
        },
        _ => Ignore,
    }
}

/// Tree mutation the owner should attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureRequest {
    Split { axis: SplitAxis, index: usize },
    /// The press ended with the collapse hint showing.
    Unsplit,
}

/// Overlay lifecycle change; each carries the area to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCommand {
    Show(Rect),
    Update(Rect),
    Hide(Rect),
}

impl OverlayCommand {
    #[must_use]
    pub const fn rect(self) -> Rect {
        match self {
            Self::Show(rect) | Self::Update(rect) | Self::Hide(rect) => rect,
        }
    }
}

/// Pointer capture change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    Acquire,
    Release,
}

/// Event kind that produced a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    HoverEnter,
    HoverMove,
    HoverLeave,
    Press,
    Move,
    Release,
    Resize,
    Cancel,
}

/// Why an event produced no gesture progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureIgnoredReason {
    OutsideCorner,
    ButtonNotAllowed,
    NoActivePress,
    SplitAlreadyFired,
    DirectionNotMapped,
}

/// Result of feeding one event to a [`GestureController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureDispatch {
    pub phase: GesturePhase,
    /// Whether the pane's default handling should be suppressed.
    pub consumed: bool,
    pub request: Option<GestureRequest>,
    /// New cursor shape, only when it changed.
    pub cursor: Option<CursorShape>,
    pub overlay: Option<OverlayCommand>,
    pub capture: Option<CaptureCommand>,
    pub ignored: Option<GestureIgnoredReason>,
}

impl GestureDispatch {
    const fn new(phase: GesturePhase) -> Self {
        Self {
            phase,
            consumed: false,
            request: None,
            cursor: None,
            overlay: None,
            capture: None,
            ignored: None,
        }
    }

    const fn ignored(phase: GesturePhase, reason: GestureIgnoredReason) -> Self {
        let mut dispatch = Self::new(phase);
        dispatch.ignored = Some(reason);
        dispatch
    }
}

/// Corner gesture recognizer for one pane.
#[derive(Debug, Clone)]
pub struct GestureController {
    config: GestureConfig,
    style: OverlayStyle,
    rect: Rect,
    regions: CornerRegions,
    state: GestureState,
    drag_active: bool,
    split_fired: bool,
    unsplit_armed: bool,
    cursor: CursorShape,
    overlay: Option<HintOverlay>,
}

impl GestureController {
    #[must_use]
    pub fn new(rect: Rect, config: GestureConfig, style: OverlayStyle) -> Self {
        Self {
            config,
            style,
            rect,
            regions: corner_regions(rect, config.corner_size),
            state: GestureState::default(),
            drag_active: false,
            split_fired: false,
            unsplit_armed: false,
            cursor: CursorShape::Default,
            overlay: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub const fn regions(&self) -> &CornerRegions {
        &self.regions
    }

    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Whether this controller holds the pointer.
    #[must_use]
    pub const fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Whether the current press already produced a split request.
    #[must_use]
    pub const fn split_fired(&self) -> bool {
        self.split_fired
    }

    /// Cursor shape this controller last asked for.
    #[must_use]
    pub const fn cursor(&self) -> CursorShape {
        self.cursor
    }

    #[must_use]
    pub const fn overlay(&self) -> Option<&HintOverlay> {
        self.overlay.as_ref()
    }

    /// Feed one event.
    pub fn handle(&mut self, event: &PaneEvent) -> GestureDispatch {
        match *event {
            PaneEvent::HoverEnter(point) => self.hover(GesturePhase::HoverEnter, point),
            PaneEvent::HoverMove(point) => self.hover(GesturePhase::HoverMove, point),
            PaneEvent::HoverLeave => self.hover_leave(),
            PaneEvent::Pressed { position, button } => self.press(position, button),
            PaneEvent::Moved { position, buttons } => self.drag(position, buttons),
            PaneEvent::Released { position, button } => self.release(position, button),
            PaneEvent::Resized(rect) => self.set_rect(rect),
        }
    }

    /// The pane was given a new rectangle.
    pub fn set_rect(&mut self, rect: Rect) -> GestureDispatch {
        let mut dispatch = GestureDispatch::new(GesturePhase::Resize);
        self.rect = rect;
        self.regions = corner_regions(rect, self.config.corner_size);
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_rect(rect);
            dispatch.overlay = Some(OverlayCommand::Update(rect));
        }
        dispatch
    }

    /// Pointer hovered `point` (or entered at it).
    pub fn hover(&mut self, phase: GesturePhase, point: Point) -> GestureDispatch {
        if self.drag_active {
            let mut dispatch = self.drag(point, PointerButtons::from(self.config.activation_button));
            dispatch.phase = phase;
            return dispatch;
        }
        let mut dispatch = GestureDispatch::new(phase);
        self.state.hovered_corner = self.corner_at(point);
        dispatch.cursor = self.update_cursor();
        dispatch
    }

    /// Pointer left the pane.
    ///
    /// Without a press this just clears hover. During a press it ends the
    /// gesture: the owner only forwards a leave mid-press when the pointer
    /// left the whole surface.
    pub fn hover_leave(&mut self) -> GestureDispatch {
        if self.drag_active {
            return self.abort(GesturePhase::HoverLeave);
        }
        let mut dispatch = GestureDispatch::new(GesturePhase::HoverLeave);
        self.state.hovered_corner = None;
        dispatch.overlay = self.take_overlay();
        dispatch.cursor = self.update_cursor();
        dispatch
    }

    pub fn press(&mut self, point: Point, button: PointerButton) -> GestureDispatch {
        if button != self.config.activation_button {
            let mut dispatch = if self.drag_active || self.overlay.is_some() {
                self.abort(GesturePhase::Press)
            } else {
                GestureDispatch::new(GesturePhase::Press)
            };
            dispatch.ignored = Some(GestureIgnoredReason::ButtonNotAllowed);
            return dispatch;
        }

        self.split_fired = false;
        self.unsplit_armed = false;
        self.state.hovered_corner = self.corner_at(point);
        if self.state.hovered_corner.is_none() {
            let mut dispatch =
                GestureDispatch::ignored(GesturePhase::Press, GestureIgnoredReason::OutsideCorner);
            dispatch.cursor = self.update_cursor();
            return dispatch;
        }

        let mut dispatch = GestureDispatch::new(GesturePhase::Press);
        self.state.drag_origin = Some(point);
        self.state.pressed = true;
        if !self.drag_active {
            self.drag_active = true;
            dispatch.capture = Some(CaptureCommand::Acquire);
        }
        dispatch.consumed = true;
        dispatch.cursor = self.update_cursor();
        debug!(
            corner = ?self.state.hovered_corner,
            x = point.x,
            y = point.y,
            "corner press"
        );
        dispatch
    }

    /// Pointer moved with `buttons` held.
    pub fn drag(&mut self, point: Point, buttons: PointerButtons) -> GestureDispatch {
        if !self.drag_active {
            if buttons.is_empty() {
                let mut dispatch = self.hover(GesturePhase::Move, point);
                dispatch.phase = GesturePhase::Move;
                return dispatch;
            }
            return GestureDispatch::ignored(GesturePhase::Move, GestureIgnoredReason::NoActivePress);
        }

        let mut dispatch = GestureDispatch::new(GesturePhase::Move);
        dispatch.consumed = true;
        if self.split_fired {
            dispatch.ignored = Some(GestureIgnoredReason::SplitAlreadyFired);
            return dispatch;
        }
        let (Some(corner), Some(origin)) = (self.state.hovered_corner, self.state.drag_origin)
        else {
            dispatch.ignored = Some(GestureIgnoredReason::NoActivePress);
            return dispatch;
        };

        let direction = classify_drag(origin, point);
        match corner_action(corner, direction) {
            CornerAction::Split { axis, index } => {
                self.split_fired = true;
                self.unsplit_armed = false;
                dispatch.overlay = self.take_overlay();
                dispatch.request = Some(GestureRequest::Split { axis, index });
                debug!(?corner, ?direction, ?axis, index, "corner gesture split");
            }
            CornerAction::UnsplitHint => {
                self.unsplit_armed = true;
                dispatch.overlay = Some(self.show_overlay(direction));
            }
            CornerAction::Ignore => {
                self.unsplit_armed = false;
                dispatch.overlay = self.take_overlay();
                dispatch.ignored = Some(GestureIgnoredReason::DirectionNotMapped);
            }
        }
        dispatch
    }

    pub fn release(&mut self, _point: Point, button: PointerButton) -> GestureDispatch {
        if button != self.config.activation_button {
            return GestureDispatch::ignored(
                GesturePhase::Release,
                GestureIgnoredReason::ButtonNotAllowed,
            );
        }
        let mut dispatch = GestureDispatch::new(GesturePhase::Release);
        dispatch.consumed = self.drag_active;
        if self.unsplit_armed && !self.split_fired {
            dispatch.request = Some(GestureRequest::Unsplit);
            debug!("unsplit intent on release");
        }
        self.finish(&mut dispatch);
        dispatch
    }

    /// Abandon any gesture in progress.
    pub fn cancel(&mut self) -> GestureDispatch {
        self.abort(GesturePhase::Cancel)
    }

    fn abort(&mut self, phase: GesturePhase) -> GestureDispatch {
        let mut dispatch = GestureDispatch::new(phase);
        if self.drag_active {
            debug!(?phase, "corner gesture cancelled");
        }
        self.finish(&mut dispatch);
        dispatch
    }

    fn finish(&mut self, dispatch: &mut GestureDispatch) {
        dispatch.overlay = self.take_overlay();
        if self.drag_active {
            dispatch.capture = Some(CaptureCommand::Release);
        }
        self.state = GestureState::default();
        self.drag_active = false;
        self.split_fired = false;
        self.unsplit_armed = false;
        dispatch.cursor = self.update_cursor();
    }

    fn corner_at(&self, point: Point) -> Option<Corner> {
        if !self.rect.contains_point(point) {
            return None;
        }
        self.regions.hit(point)
    }

    fn show_overlay(&mut self, direction: DragDirection) -> OverlayCommand {
        match self.overlay.as_mut() {
            Some(overlay) => {
                overlay.set_direction(direction);
                OverlayCommand::Update(self.rect)
            }
            None => {
                self.overlay = Some(HintOverlay::new(self.rect, direction, self.style));
                OverlayCommand::Show(self.rect)
            }
        }
    }

    fn take_overlay(&mut self) -> Option<OverlayCommand> {
        self.overlay
            .take()
            .map(|overlay| OverlayCommand::Hide(overlay.rect()))
    }

    fn update_cursor(&mut self) -> Option<CursorShape> {
        let desired = if self.state.hovered_corner.is_some() {
            CursorShape::Cross
        } else {
            CursorShape::Default
        };
        if desired == self.cursor {
            return None;
        }
        self.cursor = desired;
        Some(desired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn controller() -> GestureController {
        GestureController::new(
            Rect::from_size(200, 150),
            GestureConfig::default(),
            OverlayStyle::default(),
        )
    }

    fn held() -> PointerButtons {
        PointerButtons::LEFT
    }

    #[test]
    fn action_table_matches_corners() {
        use DragDirection::{Down, Left, None, Right, Up};
        let split = |axis, index| CornerAction::Split { axis, index };
        let h = SplitAxis::Horizontal;
        let v = SplitAxis::Vertical;
        let expected = [
            (Corner::TopLeft, [split(h, 0), split(v, 0), CornerAction::UnsplitHint, CornerAction::UnsplitHint]),
            (Corner::TopRight, [CornerAction::Ignore, split(v, 0), split(h, 1), CornerAction::Ignore]),
            (Corner::BottomLeft, [split(h, 0), CornerAction::Ignore, CornerAction::Ignore, split(v, 1)]),
            (Corner::BottomRight, [CornerAction::Ignore, CornerAction::Ignore, split(h, 1), split(v, 1)]),
        ];
        for (corner, row) in expected {
            for (direction, action) in [Right, Down, Left, Up].into_iter().zip(row) {
                assert_eq!(corner_action(corner, direction), action, "{corner:?} {direction:?}");
            }
            assert_eq!(corner_action(corner, None), CornerAction::Ignore);
        }
    }

    #[test]
    fn hover_sets_corner_and_cursor() {
        let mut c = controller();
        let d = c.hover(GesturePhase::HoverMove, Point::new(2, 2));
        assert_eq!(c.state().hovered_corner, Some(Corner::TopLeft));
        assert_eq!(d.cursor, Some(CursorShape::Cross));
        assert!(!d.consumed);

        let d = c.hover(GesturePhase::HoverMove, Point::new(3, 3));
        assert_eq!(d.cursor, None);

        let d = c.hover(GesturePhase::HoverMove, Point::new(100, 75));
        assert_eq!(c.state().hovered_corner, None);
        assert_eq!(d.cursor, Some(CursorShape::Default));
    }

    #[test]
    fn press_drag_right_from_top_left_requests_horizontal_split() {
        let mut c = controller();
        c.handle(&PaneEvent::HoverMove(Point::new(2, 2)));
        let press = c.handle(&PaneEvent::Pressed {
            position: Point::new(2, 2),
            button: PointerButton::Left,
        });
        assert!(press.consumed);
        assert_eq!(press.capture, Some(CaptureCommand::Acquire));
        assert_eq!(
            c.state(),
            GestureState {
                hovered_corner: Some(Corner::TopLeft),
                drag_origin: Some(Point::new(2, 2)),
                pressed: true,
            }
        );

        let moved = c.handle(&PaneEvent::Moved {
            position: Point::new(60, 2),
            buttons: held(),
        });
        assert_eq!(
            moved.request,
            Some(GestureRequest::Split {
                axis: SplitAxis::Horizontal,
                index: 0
            })
        );
        assert!(c.split_fired());
    }

    #[test]
    fn split_fires_once_per_press() {
        let mut c = controller();
        c.press(Point::new(197, 2), PointerButton::Left);
        let first = c.drag(Point::new(150, 3), held());
        let second = c.drag(Point::new(120, 4), held());
        assert!(first.request.is_some());
        assert_eq!(second.request, None);
        assert_eq!(second.ignored, Some(GestureIgnoredReason::SplitAlreadyFired));
        assert!(second.consumed);

        c.release(Point::new(120, 4), PointerButton::Left);
        c.press(Point::new(197, 2), PointerButton::Left);
        assert!(c.drag(Point::new(150, 3), held()).request.is_some());
    }

    #[test]
    fn press_outside_corner_propagates() {
        let mut c = controller();
        let d = c.press(Point::new(100, 75), PointerButton::Left);
        assert!(!d.consumed);
        assert_eq!(d.ignored, Some(GestureIgnoredReason::OutsideCorner));
        assert!(!c.is_drag_active());
        let m = c.drag(Point::new(120, 75), held());
        assert_eq!(m.ignored, Some(GestureIgnoredReason::NoActivePress));
    }

    #[test]
    fn other_button_cancels_and_propagates() {
        let mut c = controller();
        c.press(Point::new(2, 2), PointerButton::Left);
        c.drag(Point::new(0, 2), held());
        assert!(c.overlay().is_some());
        let d = c.press(Point::new(2, 2), PointerButton::Right);
        assert!(!d.consumed);
        assert_eq!(d.capture, Some(CaptureCommand::Release));
        assert_eq!(d.overlay, Some(OverlayCommand::Hide(Rect::from_size(200, 150))));
        assert_eq!(c.state(), GestureState::default());
        assert!(c.overlay().is_none());
    }

    #[test]
    fn outward_drag_shows_hint_and_release_hides_it() {
        let mut c = controller();
        c.press(Point::new(5, 5), PointerButton::Left);
        let d = c.drag(Point::new(1, 5), held());
        assert_eq!(d.request, None);
        assert_eq!(d.overlay, Some(OverlayCommand::Show(Rect::from_size(200, 150))));
        assert_eq!(c.overlay().map(HintOverlay::direction), Some(DragDirection::Left));

        let d = c.drag(Point::new(5, 1), held());
        assert_eq!(d.overlay, Some(OverlayCommand::Update(Rect::from_size(200, 150))));
        assert_eq!(c.overlay().map(HintOverlay::direction), Some(DragDirection::Up));

        let r = c.release(Point::new(5, 1), PointerButton::Left);
        assert_eq!(r.request, Some(GestureRequest::Unsplit));
        assert_eq!(r.overlay, Some(OverlayCommand::Hide(Rect::from_size(200, 150))));
        assert!(c.overlay().is_none());
        assert_eq!(c.state(), GestureState::default());
    }

    #[test]
    fn release_after_disarmed_hint_requests_nothing() {
        let mut c = controller();
        c.press(Point::new(5, 5), PointerButton::Left);
        c.drag(Point::new(5, 0), held());
        c.drag(Point::new(5, 5), held());
        let r = c.release(Point::new(5, 5), PointerButton::Left);
        assert_eq!(r.request, None);
    }

    #[test]
    fn returning_to_origin_drops_hint() {
        let mut c = controller();
        c.press(Point::new(5, 5), PointerButton::Left);
        c.drag(Point::new(1, 5), held());
        let d = c.drag(Point::new(5, 5), held());
        assert_eq!(d.ignored, Some(GestureIgnoredReason::DirectionNotMapped));
        assert!(matches!(d.overlay, Some(OverlayCommand::Hide(_))));
    }

    #[test]
    fn leave_during_press_cancels() {
        let mut c = controller();
        c.press(Point::new(5, 5), PointerButton::Left);
        c.drag(Point::new(1, 5), held());
        let d = c.hover_leave();
        assert_eq!(d.phase, GesturePhase::HoverLeave);
        assert_eq!(d.capture, Some(CaptureCommand::Release));
        assert!(d.overlay.is_some());
        assert!(!c.is_drag_active());
    }

    #[test]
    fn leave_without_press_resets_hover() {
        let mut c = controller();
        c.hover(GesturePhase::HoverEnter, Point::new(2, 2));
        let d = c.hover_leave();
        assert_eq!(d.cursor, Some(CursorShape::Default));
        assert_eq!(d.capture, None);
        assert_eq!(c.state().hovered_corner, None);
    }

    #[test]
    fn hover_while_captured_counts_as_drag() {
        let mut c = controller();
        c.press(Point::new(2, 147), PointerButton::Left);
        let d = c.hover(GesturePhase::HoverMove, Point::new(2, 100));
        assert_eq!(
            d.request,
            Some(GestureRequest::Split {
                axis: SplitAxis::Vertical,
                index: 1
            })
        );
    }

    #[test]
    fn resize_moves_regions_and_overlay() {
        let mut c = controller();
        c.press(Point::new(5, 5), PointerButton::Left);
        c.drag(Point::new(1, 5), held());
        let d = c.set_rect(Rect::new(10, 0, 100, 100));
        assert_eq!(d.overlay, Some(OverlayCommand::Update(Rect::new(10, 0, 100, 100))));
        assert_eq!(c.regions().hit(Point::new(108, 1)), Some(Corner::TopRight));
    }
}
