#![forbid(unsafe_code)]

//! Split-view engine: the pane tree plus one gesture controller per leaf.
//!
//! [`SplitView`] is the piece a host talks to. It receives surface-level
//! [`PaneEvent`]s, synthesizes per-pane hover enter/leave, routes presses to
//! the leaf under the pointer (corners first, then separators), and keeps
//! routing to the same target until release. Gesture requests are applied to
//! the tree here; structural failures that only mean "the gesture raced
//! itself" are absorbed and reported in [`ViewResponse::absorbed`].
//!
//! After a gesture split the same press can continue as a drag of the new
//! separator ([`GestureConfig::handoff_to_separator`]), so one motion both
//! creates a pane and sizes it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use panesplit_core::cursor::CursorShape;
use panesplit_core::event::{PaneEvent, PointerButton, PointerButtons};
use panesplit_core::geometry::{Point, Rect};
use panesplit_core::logging::{debug, warn};
use panesplit_core::surface::{RenderSurface, Rgba};
use panesplit_layout::{
    ConfigError, PaneError, PaneId, PaneTree, Payload, SplitAxis, SplitConfig, SplitOutcome,
    UnsplitOutcome,
};

use crate::config::GestureConfig;
use crate::gesture::{
    CaptureCommand, GestureController, GestureDispatch, GesturePhase, GestureRequest,
};
use crate::host::PaneHost;
use crate::overlay::OverlayStyle;

/// Colour used for separators with non-zero thickness.
pub const DEFAULT_SEPARATOR_COLOR: Rgba = Rgba::rgb(0x44, 0x44, 0x44);

/// Who receives pointer input until the active button is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewCapture {
    #[default]
    None,
    /// A leaf's corner gesture.
    Gesture(PaneId),
    /// The separator of an internal node.
    Separator(PaneId),
    /// The press already acted; remaining input is swallowed until release.
    Swallow,
}

/// What one event did to the view.
#[derive(Debug)]
pub struct ViewResponse<P> {
    /// Whether the host should skip its own handling of the event.
    pub consumed: bool,
    pub split: Option<SplitOutcome>,
    /// Payloads discarded by a collapse are handed back here.
    pub unsplit: Option<UnsplitOutcome<P>>,
    /// Leaf whose press ended on the unsplit hint without a collapse being
    /// applied.
    pub unsplit_requested: Option<PaneId>,
    /// Structural failure that was dropped instead of surfaced.
    pub absorbed: Option<PaneError>,
}

impl<P> ViewResponse<P> {
    fn unhandled() -> Self {
        Self {
            consumed: false,
            split: None,
            unsplit: None,
            unsplit_requested: None,
            absorbed: None,
        }
    }

    fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::unhandled()
        }
    }
}

/// Interactive split layout over payloads of type `P`.
pub struct SplitView<P> {
    tree: PaneTree<P>,
    gesture: GestureConfig,
    style: OverlayStyle,
    separator_color: Rgba,
    factory: Box<dyn FnMut() -> P>,
    controllers: BTreeMap<PaneId, GestureController>,
    hovered: Option<PaneId>,
    capture: ViewCapture,
    cursor: CursorShape,
}

impl<P: fmt::Debug> fmt::Debug for SplitView<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitView")
            .field("tree", &self.tree)
            .field("gesture", &self.gesture)
            .field("hovered", &self.hovered)
            .field("capture", &self.capture)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<P: Payload> SplitView<P> {
    /// View with default split and gesture settings.
    ///
    /// `factory` creates the payload for panes opened by a gesture.
    pub fn new(area: Rect, root: P, factory: impl FnMut() -> P + 'static) -> Self {
        Self::build(
            PaneTree::new(area, root),
            GestureConfig::default(),
            Box::new(factory),
        )
    }

    /// View with explicit settings.
    pub fn with_config(
        area: Rect,
        root: P,
        factory: impl FnMut() -> P + 'static,
        split: SplitConfig,
        gesture: GestureConfig,
    ) -> Result<Self, ConfigError> {
        if let Err(err) = gesture.validate() {
            warn!(%err, "gesture config rejected");
            return Err(err);
        }
        let tree = PaneTree::with_config(area, root, split)?;
        Ok(Self::build(tree, gesture, Box::new(factory)))
    }

    fn build(tree: PaneTree<P>, gesture: GestureConfig, factory: Box<dyn FnMut() -> P>) -> Self {
        let mut view = Self {
            tree,
            gesture,
            style: OverlayStyle::default(),
            separator_color: DEFAULT_SEPARATOR_COLOR,
            factory,
            controllers: BTreeMap::new(),
            hovered: None,
            capture: ViewCapture::None,
            cursor: CursorShape::Default,
        };
        for id in view.tree.leaf_ids() {
            if let Some(node) = view.tree.node(id) {
                view.controllers
                    .insert(id, GestureController::new(node.rect(), gesture, view.style));
            }
        }
        view
    }

    /// Override the overlay colours.
    #[must_use]
    pub fn with_overlay_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        for controller in self.controllers.values_mut() {
            *controller = GestureController::new(controller.rect(), self.gesture, style);
        }
        self
    }

    #[must_use]
    pub fn with_separator_color(mut self, color: Rgba) -> Self {
        self.separator_color = color;
        self
    }

    #[must_use]
    pub const fn tree(&self) -> &PaneTree<P> {
        &self.tree
    }

    #[must_use]
    pub const fn gesture_config(&self) -> &GestureConfig {
        &self.gesture
    }

    #[must_use]
    pub fn payload(&self, id: PaneId) -> Option<&P> {
        self.tree.payload(id)
    }

    pub fn payload_mut(&mut self, id: PaneId) -> Option<&mut P> {
        self.tree.payload_mut(id)
    }

    /// Gesture controller of leaf `id`.
    #[must_use]
    pub fn controller(&self, id: PaneId) -> Option<&GestureController> {
        self.controllers.get(&id)
    }

    #[must_use]
    pub const fn capture(&self) -> ViewCapture {
        self.capture
    }

    /// Cursor shape last sent to the host.
    #[must_use]
    pub const fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Leaf currently under the pointer.
    #[must_use]
    pub const fn hovered_leaf(&self) -> Option<PaneId> {
        self.hovered
    }

    /// Feed one surface event.
    pub fn handle_event(&mut self, event: PaneEvent, host: &mut dyn PaneHost) -> ViewResponse<P> {
        match event {
            PaneEvent::Resized(area) => {
                self.resize(area, host);
                ViewResponse::unhandled()
            }
            PaneEvent::HoverEnter(point) | PaneEvent::HoverMove(point) => {
                if self.capture == ViewCapture::None {
                    self.hover_at(point, host);
                    ViewResponse::unhandled()
                } else {
                    let buttons = host.pointer_buttons();
                    self.on_move(point, buttons, host)
                }
            }
            PaneEvent::HoverLeave => self.on_leave(host),
            PaneEvent::Pressed { position, button } => self.on_press(position, button, host),
            PaneEvent::Moved { position, buttons } => self.on_move(position, buttons, host),
            PaneEvent::Released { position, button } => self.on_release(position, button, host),
        }
    }

    /// Re-layout into `area`.
    pub fn resize(&mut self, area: Rect, host: &mut dyn PaneHost) {
        self.tree.resize(area);
        self.sync_controllers(host);
        host.request_repaint(area);
        self.refresh_hover(host);
    }

    /// Split leaf `leaf`, creating the new payload through the factory.
    pub fn split(
        &mut self,
        leaf: PaneId,
        axis: SplitAxis,
        index: usize,
        host: &mut dyn PaneHost,
    ) -> Result<SplitOutcome, PaneError> {
        let payload = (self.factory)();
        self.split_with(leaf, axis, index, payload, host)
    }

    /// Split leaf `leaf` with an explicit payload for the new pane.
    pub fn split_with(
        &mut self,
        leaf: PaneId,
        axis: SplitAxis,
        index: usize,
        payload: P,
        host: &mut dyn PaneHost,
    ) -> Result<SplitOutcome, PaneError> {
        let outcome = self.tree.split(leaf, axis, index, payload)?;
        if self.capture == ViewCapture::Gesture(leaf) {
            self.capture = ViewCapture::Swallow;
        }
        self.sync_controllers(host);
        self.repaint_node(outcome.node, host);
        Ok(outcome)
    }

    /// Collapse internal node `node`.
    pub fn unsplit(
        &mut self,
        node: PaneId,
        recursive: bool,
        host: &mut dyn PaneHost,
    ) -> Result<UnsplitOutcome<P>, PaneError> {
        let outcome = self.tree.unsplit(node, recursive)?;
        self.after_unsplit(&outcome, host);
        Ok(outcome)
    }

    /// Collapse the parent of leaf `leaf`, found through its parent link.
    pub fn unsplit_parent_of(
        &mut self,
        leaf: PaneId,
        host: &mut dyn PaneHost,
    ) -> Result<UnsplitOutcome<P>, PaneError> {
        let outcome = self.tree.unsplit_parent_of(leaf)?;
        self.after_unsplit(&outcome, host);
        Ok(outcome)
    }

    /// Abandon whatever press is in progress.
    pub fn cancel_gestures(&mut self, host: &mut dyn PaneHost) {
        self.end_capture(host);
        for controller in self.controllers.values_mut() {
            let dispatch = controller.cancel();
            apply_overlay(&dispatch, host);
        }
        self.update_cursor(None, host);
    }

    /// Paint panes, separators, then any active hint overlays on top.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        self.tree.render(surface, self.separator_color);
        for controller in self.controllers.values() {
            if let Some(overlay) = controller.overlay() {
                overlay.render(surface);
            }
        }
    }

    fn on_leave(&mut self, host: &mut dyn PaneHost) -> ViewResponse<P> {
        let consumed = self.capture != ViewCapture::None;
        self.end_capture(host);
        if let Some(old) = self.hovered.take()
            && let Some(controller) = self.controllers.get_mut(&old)
        {
            let dispatch = controller.hover_leave();
            apply_overlay(&dispatch, host);
        }
        self.update_cursor(None, host);
        ViewResponse {
            consumed,
            ..ViewResponse::unhandled()
        }
    }

    fn on_press(
        &mut self,
        point: Point,
        button: PointerButton,
        host: &mut dyn PaneHost,
    ) -> ViewResponse<P> {
        self.tree.clear_split_guards();
        self.end_capture(host);
        if button != self.gesture.activation_button {
            self.update_cursor(Some(point), host);
            return ViewResponse::unhandled();
        }

        if let Some(leaf) = self.tree.leaf_at(point) {
            if self.hovered != Some(leaf) {
                self.hover_at(point, host);
            }
            if let Some(controller) = self.controllers.get_mut(&leaf) {
                let dispatch = controller.press(point, button);
                apply_overlay(&dispatch, host);
                if dispatch.capture == Some(CaptureCommand::Acquire) {
                    self.capture = ViewCapture::Gesture(leaf);
                }
                if dispatch.consumed {
                    self.update_cursor(Some(point), host);
                    return ViewResponse::consumed();
                }
            }
        }

        if let Some(node) = self.tree.separator_at(point)
            && self.tree.grab_separator(node, point).is_ok()
        {
            self.capture = ViewCapture::Separator(node);
            self.update_cursor(Some(point), host);
            debug!(node = node.get(), "separator grabbed");
            return ViewResponse::consumed();
        }
        ViewResponse::unhandled()
    }

    fn on_move(
        &mut self,
        point: Point,
        buttons: PointerButtons,
        host: &mut dyn PaneHost,
    ) -> ViewResponse<P> {
        let active = self.gesture.activation_button;
        match self.capture {
            ViewCapture::None => {
                if buttons.is_empty() {
                    self.hover_at(point, host);
                }
                ViewResponse::unhandled()
            }
            _ if !buttons.holds(active) => {
                debug!("release missed; ending capture on move");
                self.on_release(point, active, host)
            }
            ViewCapture::Gesture(leaf) => self.drive_gesture(leaf, point, buttons, host),
            ViewCapture::Separator(node) => {
                match self.tree.drag_separator(node, point) {
                    Ok(true) => {
                        self.sync_controllers(host);
                        self.repaint_node(node, host);
                    }
                    Ok(false) => {}
                    Err(err) => {
                        debug!(%err, "separator drag dropped");
                        self.capture = ViewCapture::None;
                        return ViewResponse {
                            absorbed: Some(err),
                            ..ViewResponse::consumed()
                        };
                    }
                }
                ViewResponse::consumed()
            }
            ViewCapture::Swallow => ViewResponse::consumed(),
        }
    }

    fn drive_gesture(
        &mut self,
        leaf: PaneId,
        point: Point,
        buttons: PointerButtons,
        host: &mut dyn PaneHost,
    ) -> ViewResponse<P> {
        let Some(controller) = self.controllers.get_mut(&leaf) else {
            self.capture = ViewCapture::None;
            return ViewResponse::unhandled();
        };
        let dispatch = controller.drag(point, buttons);
        apply_overlay(&dispatch, host);

        let mut response = ViewResponse::consumed();
        if let Some(GestureRequest::Split { axis, index }) = dispatch.request {
            let payload = (self.factory)();
            match self.split_with(leaf, axis, index, payload, host) {
                Ok(outcome) => {
                    if self.gesture.handoff_to_separator
                        && self.tree.grab_separator_at_pointer(outcome.node).is_ok()
                    {
                        self.capture = ViewCapture::Separator(outcome.node);
                        debug!(node = outcome.node.get(), "press handed to new separator");
                    } else {
                        self.capture = ViewCapture::Swallow;
                    }
                    response.split = Some(outcome);
                }
                Err(err) => {
                    debug!(%err, benign = err.is_benign(), "split request absorbed");
                    response.absorbed = Some(err);
                }
            }
        }
        self.update_cursor(Some(point), host);
        response
    }

    fn on_release(
        &mut self,
        point: Point,
        button: PointerButton,
        host: &mut dyn PaneHost,
    ) -> ViewResponse<P> {
        if button != self.gesture.activation_button {
            return ViewResponse::unhandled();
        }
        let mut response = ViewResponse::unhandled();
        match std::mem::take(&mut self.capture) {
            ViewCapture::Gesture(leaf) => {
                let dispatch = self
                    .controllers
                    .get_mut(&leaf)
                    .map(|controller| controller.release(point, button));
                if let Some(dispatch) = dispatch {
                    apply_overlay(&dispatch, host);
                    response.consumed = dispatch.consumed;
                    match dispatch.request {
                        Some(GestureRequest::Unsplit) if self.gesture.confirm_unsplit_on_release => {
                            match self.unsplit_parent_of(leaf, host) {
                                Ok(outcome) => response.unsplit = Some(outcome),
                                Err(err) => {
                                    debug!(%err, "unsplit request absorbed");
                                    response.absorbed = Some(err);
                                }
                            }
                        }
                        Some(GestureRequest::Unsplit) => response.unsplit_requested = Some(leaf),
                        _ => {}
                    }
                }
            }
            ViewCapture::Separator(node) => {
                if let Err(err) = self.tree.release_separator(node) {
                    debug!(%err, "separator already gone");
                }
                response.consumed = true;
            }
            ViewCapture::Swallow => response.consumed = true,
            ViewCapture::None => {
                if let Some(leaf) = self.hovered
                    && let Some(controller) = self.controllers.get_mut(&leaf)
                {
                    let dispatch = controller.release(point, button);
                    apply_overlay(&dispatch, host);
                }
            }
        }
        self.hover_at(point, host);
        response
    }

    fn hover_at(&mut self, point: Point, host: &mut dyn PaneHost) {
        let leaf = self.tree.leaf_at(point);
        if leaf == self.hovered {
            if let Some(controller) = leaf.and_then(|id| self.controllers.get_mut(&id)) {
                let dispatch = controller.hover(GesturePhase::HoverMove, point);
                apply_overlay(&dispatch, host);
            }
        } else {
            if let Some(controller) = self.hovered.and_then(|id| self.controllers.get_mut(&id)) {
                let dispatch = controller.hover_leave();
                apply_overlay(&dispatch, host);
            }
            if let Some(controller) = leaf.and_then(|id| self.controllers.get_mut(&id)) {
                let dispatch = controller.hover(GesturePhase::HoverEnter, point);
                apply_overlay(&dispatch, host);
            }
            self.hovered = leaf;
        }
        self.update_cursor(Some(point), host);
    }

    fn refresh_hover(&mut self, host: &mut dyn PaneHost) {
        if self.capture != ViewCapture::None {
            return;
        }
        match host.pointer_position() {
            Some(point) => self.hover_at(point, host),
            None => self.update_cursor(None, host),
        }
    }

    fn end_capture(&mut self, host: &mut dyn PaneHost) {
        match std::mem::take(&mut self.capture) {
            ViewCapture::Gesture(leaf) => {
                if let Some(controller) = self.controllers.get_mut(&leaf) {
                    let dispatch = controller.cancel();
                    apply_overlay(&dispatch, host);
                }
            }
            ViewCapture::Separator(node) => {
                if let Err(err) = self.tree.release_separator(node) {
                    debug!(%err, "separator already gone");
                }
            }
            ViewCapture::Swallow | ViewCapture::None => {}
        }
    }

    fn after_unsplit(&mut self, outcome: &UnsplitOutcome<P>, host: &mut dyn PaneHost) {
        let stale = match self.capture {
            ViewCapture::Gesture(id) => outcome.removed.contains(&id),
            ViewCapture::Separator(id) => id == outcome.node || outcome.removed.contains(&id),
            ViewCapture::Swallow | ViewCapture::None => false,
        };
        if stale {
            self.capture = ViewCapture::None;
        }
        self.sync_controllers(host);
        self.repaint_node(outcome.node, host);
        self.refresh_hover(host);
    }

    /// Bring the controller set in line with the tree's leaves.
    ///
    /// Controllers of panes that left the tree are cancelled first so their
    /// overlays are released.
    fn sync_controllers(&mut self, host: &mut dyn PaneHost) {
        let leaves: BTreeSet<PaneId> = self.tree.leaf_ids().into_iter().collect();
        let stale: Vec<PaneId> = self
            .controllers
            .keys()
            .filter(|id| !leaves.contains(id))
            .copied()
            .collect();
        for id in stale {
            if let Some(mut controller) = self.controllers.remove(&id) {
                let dispatch = controller.cancel();
                apply_overlay(&dispatch, host);
            }
        }

        for id in leaves {
            let Some(rect) = self.tree.node(id).map(|node| node.rect()) else {
                continue;
            };
            match self.controllers.get_mut(&id) {
                Some(controller) => {
                    if controller.rect() != rect {
                        let dispatch = controller.set_rect(rect);
                        apply_overlay(&dispatch, host);
                    }
                }
                None => {
                    self.controllers
                        .insert(id, GestureController::new(rect, self.gesture, self.style));
                }
            }
        }

        if self
            .hovered
            .is_some_and(|id| !self.controllers.contains_key(&id))
        {
            self.hovered = None;
        }
        if let ViewCapture::Gesture(leaf) = self.capture
            && !self.controllers.contains_key(&leaf)
        {
            self.capture = ViewCapture::None;
        }
    }

    fn repaint_node(&self, id: PaneId, host: &mut dyn PaneHost) {
        if let Some(node) = self.tree.node(id) {
            host.request_repaint(node.rect());
        }
    }

    fn desired_cursor(&self, point: Option<Point>) -> CursorShape {
        match self.capture {
            ViewCapture::Gesture(leaf) => self
                .controllers
                .get(&leaf)
                .map_or(CursorShape::Default, GestureController::cursor),
            ViewCapture::Separator(node) => self
                .tree
                .node(node)
                .and_then(|n| n.separator())
                .map_or(CursorShape::Default, |s| s.cursor()),
            ViewCapture::Swallow => self.cursor,
            ViewCapture::None => {
                let corner = self
                    .hovered
                    .and_then(|id| self.controllers.get(&id))
                    .is_some_and(|c| c.state().hovered_corner.is_some());
                if corner {
                    return CursorShape::Cross;
                }
                point
                    .and_then(|p| self.tree.separator_at(p))
                    .and_then(|id| self.tree.node(id))
                    .and_then(|n| n.separator())
                    .map_or(CursorShape::Default, |s| s.cursor())
            }
        }
    }

    fn update_cursor(&mut self, point: Option<Point>, host: &mut dyn PaneHost) {
        let desired = self.desired_cursor(point);
        if desired != self.cursor {
            self.cursor = desired;
            host.set_cursor_shape(desired);
        }
    }
}

fn apply_overlay(dispatch: &GestureDispatch, host: &mut dyn PaneHost) {
    if let Some(command) = dispatch.overlay {
        host.request_repaint(command.rect());
    }
}
