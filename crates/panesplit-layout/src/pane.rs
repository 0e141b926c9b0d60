#![forbid(unsafe_code)]

//! Recursive binary pane tree.
//!
//! Each [`PaneNode`] is either a leaf holding a payload or an internal node
//! holding exactly two children and the [`Separator`] between them. Nodes
//! own their children; the `parent` link is a plain [`PaneId`] used for
//! upward lookups through [`PaneTree::parent_of`].
//!
//! # Split
//!
//! Splitting a leaf keeps the node (and its id) in place and turns it into
//! an internal node. Two fresh leaves are created: one receives the
//! caller's new payload at the requested slot, the other inherits the
//! payload the leaf held before. The new pane starts at
//! [`SplitConfig::new_pane_fraction`] of the available extent.
//!
//! # Unsplit
//!
//! Collapsing an internal node whose children are both leaves restores it
//! to a leaf holding the payload of the child that inherited it at split
//! time. The other payload is handed back to the caller. With `recursive`
//! set, internal children are collapsed bottom-up first.
//!
//! # Invariants
//!
//! 1. A node has a payload iff it has no children.
//! 2. Children's parent link names their parent.
//! 3. Children plus the separator boundary tile the parent rectangle.
//! 4. Separator ratios stay in `[min, 1 - min]`.
//! 5. Ids are unique and never reused.

use std::collections::HashSet;
use std::fmt;

use panesplit_core::geometry::{Point, Rect};
use panesplit_core::logging::{debug, warn};
use panesplit_core::surface::{RenderSurface, Rgba};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SplitConfig};
use crate::error::{InvariantViolation, PaneError};
use crate::payload::Payload;
use crate::separator::Separator;

/// Stable identifier for pane nodes.
///
/// `0` is reserved so ids are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(u64);

impl PaneId {
    /// Lowest valid pane id; always the root of a fresh tree.
    pub const MIN: Self = Self(1);

    /// Create a pane id, rejecting 0.
    #[must_use]
    pub const fn new(raw: u64) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    fn checked_next(self) -> Result<Self, PaneError> {
        match self.0.checked_add(1) {
            Some(next) => Ok(Self(next)),
            None => Err(PaneError::IdOverflow { current: self }),
        }
    }
}

impl Default for PaneId {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Orientation of a split node.
///
/// `Horizontal` places children side by side (divided along x);
/// `Vertical` stacks them (divided along y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAxis {
    Horizontal,
    Vertical,
}

/// Child position inside an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Left (horizontal) or top (vertical).
    First,
    /// Right (horizontal) or bottom (vertical).
    Second,
}

impl Slot {
    /// Slot for an insertion index; anything past 1 clamps to [`Slot::Second`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        if index == 0 { Self::First } else { Self::Second }
    }

    /// Array index of this slot.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// The sibling slot.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Result of a successful split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOutcome {
    /// The node that became internal.
    pub node: PaneId,
    pub axis: SplitAxis,
    /// Leaf holding the newly supplied payload.
    pub new_leaf: PaneId,
    /// Leaf holding the payload the node had before.
    pub kept_leaf: PaneId,
    /// Slot of `new_leaf`.
    pub new_slot: Slot,
}

/// Result of a successful unsplit.
#[derive(Debug)]
pub struct UnsplitOutcome<P> {
    /// The node that became a leaf again.
    pub node: PaneId,
    /// Payloads that no longer have a pane, innermost first.
    pub discarded: Vec<P>,
    /// Ids of every node that left the tree.
    pub removed: Vec<PaneId>,
}

impl<P> UnsplitOutcome<P> {
    fn new(node: PaneId) -> Self {
        Self {
            node,
            discarded: Vec::new(),
            removed: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct SplitState<P> {
    separator: Separator,
    children: [PaneNode<P>; 2],
    /// Slot of the child that inherited the payload at split time.
    primary: Slot,
}

/// One node of the pane tree.
#[derive(Debug)]
pub struct PaneNode<P> {
    id: PaneId,
    parent: Option<PaneId>,
    rect: Rect,
    payload: Option<P>,
    split: Option<Box<SplitState<P>>>,
    splitting: bool,
}

impl<P> PaneNode<P> {
    fn leaf(id: PaneId, parent: Option<PaneId>, payload: P) -> Self {
        Self {
            id,
            parent,
            rect: Rect::default(),
            payload: Some(payload),
            split: None,
            splitting: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PaneId {
        self.id
    }

    /// Parent id, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<PaneId> {
        self.parent
    }

    /// Rectangle assigned by the last resize.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.split.is_none()
    }

    /// Split axis, or `None` for a leaf.
    #[must_use]
    pub fn orientation(&self) -> Option<SplitAxis> {
        self.split.as_ref().map(|s| s.separator.axis())
    }

    /// Whether this node was split during the current press.
    #[must_use]
    pub const fn is_splitting(&self) -> bool {
        self.splitting
    }

    #[must_use]
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    pub fn payload_mut(&mut self) -> Option<&mut P> {
        self.payload.as_mut()
    }

    #[must_use]
    pub fn separator(&self) -> Option<&Separator> {
        self.split.as_ref().map(|s| &s.separator)
    }

    /// First child's share, or `None` for a leaf.
    #[must_use]
    pub fn split_ratio(&self) -> Option<f64> {
        self.separator().map(Separator::ratio)
    }

    /// Child at `slot`.
    #[must_use]
    pub fn child(&self, slot: Slot) -> Option<&PaneNode<P>> {
        self.split.as_ref().map(|s| &s.children[slot.index()])
    }

    /// Slot of the child that will survive an unsplit.
    #[must_use]
    pub fn primary_slot(&self) -> Option<Slot> {
        self.split.as_ref().map(|s| s.primary)
    }

    /// Find a node in this subtree.
    #[must_use]
    pub fn find(&self, id: PaneId) -> Option<&PaneNode<P>> {
        if self.id == id {
            return Some(self);
        }
        self.split
            .as_ref()?
            .children
            .iter()
            .find_map(|child| child.find(id))
    }

    /// Find a node in this subtree, mutably.
    pub fn find_mut(&mut self, id: PaneId) -> Option<&mut PaneNode<P>> {
        if self.id == id {
            return Some(self);
        }
        self.split
            .as_mut()?
            .children
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Leaf ids in reading order (first child before second).
    #[must_use]
    pub fn leaf_ids(&self) -> Vec<PaneId> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<PaneId>) {
        match &self.split {
            None => out.push(self.id),
            Some(state) => {
                for child in &state.children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Number of leaves in this subtree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match &self.split {
            None => 1,
            Some(state) => state.children.iter().map(PaneNode::leaf_count).sum(),
        }
    }

    /// Height of this subtree; a leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match &self.split {
            None => 0,
            Some(state) => 1 + state.children.iter().map(PaneNode::depth).max().unwrap_or(0),
        }
    }

    /// Leaf whose rectangle contains `point`.
    #[must_use]
    pub fn leaf_at(&self, point: Point) -> Option<PaneId> {
        if !self.rect.contains_point(point) {
            return None;
        }
        match &self.split {
            None => Some(self.id),
            Some(state) => state.children.iter().find_map(|c| c.leaf_at(point)),
        }
    }

    /// Deepest internal node whose separator grab region contains `point`.
    #[must_use]
    pub fn separator_at(&self, point: Point) -> Option<PaneId> {
        let state = self.split.as_ref()?;
        state
            .children
            .iter()
            .find_map(|c| c.separator_at(point))
            .or_else(|| state.separator.hit(point).then_some(self.id))
    }

    /// Clear the split-in-progress guard on this subtree.
    pub fn clear_split_guards(&mut self) {
        self.splitting = false;
        if let Some(state) = self.split.as_mut() {
            for child in &mut state.children {
                child.clear_split_guards();
            }
        }
    }

    /// Visit every node depth-first, parents before children.
    pub fn visit(&self, f: &mut dyn FnMut(&PaneNode<P>)) {
        f(self);
        if let Some(state) = &self.split {
            for child in &state.children {
                child.visit(f);
            }
        }
    }
}

impl<P: Payload> PaneNode<P> {
    /// Assign `rect` to this node and partition it among descendants.
    ///
    /// Leaves notify their payload; internal nodes divide `rect` through
    /// their separator and recurse. Cells past the end of the coordinate
    /// space are dropped.
    pub fn resize(&mut self, rect: Rect) {
        let rect = rect.addressable();
        self.rect = rect;
        if let Some(state) = self.split.as_mut() {
            let (first, second) = state.separator.partition(rect);
            let [a, b] = &mut state.children;
            a.resize(first);
            b.resize(second);
        } else if let Some(payload) = self.payload.as_mut() {
            payload.on_layout_changed(rect);
        }
    }

    fn split_with(
        &mut self,
        axis: SplitAxis,
        slot: Slot,
        payload: P,
        ids: (PaneId, PaneId),
        config: &SplitConfig,
    ) -> Result<SplitOutcome, PaneError> {
        if self.splitting {
            return Err(PaneError::AlreadySplitting { node: self.id });
        }
        if self.split.is_some() {
            return Err(PaneError::NotLeaf { node: self.id });
        }
        let Some(existing) = self.payload.take() else {
            return Err(PaneError::Invariant {
                node: self.id,
                violation: InvariantViolation::PayloadChildrenMismatch,
            });
        };

        let (new_id, kept_id) = ids;
        let new_leaf = PaneNode::leaf(new_id, Some(self.id), payload);
        let kept_leaf = PaneNode::leaf(kept_id, Some(self.id), existing);
        let (children, ratio) = match slot {
            Slot::First => ([new_leaf, kept_leaf], config.new_pane_fraction),
            Slot::Second => ([kept_leaf, new_leaf], 1.0 - config.new_pane_fraction),
        };
        self.split = Some(Box::new(SplitState {
            separator: Separator::new(axis, ratio, config),
            children,
            primary: slot.other(),
        }));
        self.splitting = true;
        self.resize(self.rect);

        debug!(
            node = self.id.get(),
            new_leaf = new_id.get(),
            kept_leaf = kept_id.get(),
            ?axis,
            ?slot,
            "pane split"
        );
        Ok(SplitOutcome {
            node: self.id,
            axis,
            new_leaf: new_id,
            kept_leaf: kept_id,
            new_slot: slot,
        })
    }

    /// Collapse this node back into a leaf.
    ///
    /// Fails with [`PaneError::NotSplit`] on a leaf, or when `recursive` is
    /// false and a child is itself internal.
    pub fn unsplit(&mut self, recursive: bool) -> Result<UnsplitOutcome<P>, PaneError> {
        let mut outcome = UnsplitOutcome::new(self.id);
        self.collapse_into(recursive, &mut outcome)?;
        Ok(outcome)
    }

    fn collapse_into(
        &mut self,
        recursive: bool,
        outcome: &mut UnsplitOutcome<P>,
    ) -> Result<(), PaneError> {
        let Some(state) = self.split.as_mut() else {
            return Err(PaneError::NotSplit { node: self.id });
        };
        if recursive {
            for child in &mut state.children {
                if !child.is_leaf() {
                    child.collapse_into(true, outcome)?;
                }
            }
        } else if state.children.iter().any(|c| !c.is_leaf()) {
            return Err(PaneError::NotSplit { node: self.id });
        }

        let Some(state) = self.split.take() else {
            return Err(PaneError::NotSplit { node: self.id });
        };
        let SplitState {
            children, primary, ..
        } = *state;
        let [first, second] = children;
        let (survivor, dropped) = match primary {
            Slot::First => (first, second),
            Slot::Second => (second, first),
        };
        outcome.removed.push(survivor.id);
        outcome.removed.push(dropped.id);
        outcome.discarded.extend(dropped.payload);
        self.payload = survivor.payload;
        self.splitting = false;
        self.resize(self.rect);

        debug!(
            node = self.id.get(),
            survivor = survivor.id.get(),
            dropped = dropped.id.get(),
            "pane unsplit"
        );
        Ok(())
    }

    /// Paint leaves through their payloads and non-empty separators in
    /// `separator_color`.
    pub fn render(&self, surface: &mut dyn RenderSurface, separator_color: Rgba) {
        match &self.split {
            None => {
                if let Some(payload) = &self.payload {
                    payload.render(surface, self.rect);
                }
            }
            Some(state) => {
                for child in &state.children {
                    child.render(surface, separator_color);
                }
                let boundary = state.separator.boundary();
                if !boundary.is_empty() {
                    surface.fill_rect(boundary, separator_color);
                }
            }
        }
    }

    fn validate_into(&self, seen: &mut HashSet<PaneId>) -> Result<(), PaneError> {
        let fail = |violation| {
            Err(PaneError::Invariant {
                node: self.id,
                violation,
            })
        };
        if !seen.insert(self.id) {
            return fail(InvariantViolation::DuplicateId);
        }
        match (&self.payload, &self.split) {
            (Some(_), None) => {
                if self.splitting {
                    return fail(InvariantViolation::GuardOnLeaf);
                }
                Ok(())
            }
            (None, Some(state)) => {
                let sep = &state.separator;
                let min = sep.min_fraction();
                if sep.ratio() < min || sep.ratio() > 1.0 - min {
                    return fail(InvariantViolation::RatioOutOfRange);
                }
                let [a, b] = &state.children;
                if a.parent != Some(self.id) || b.parent != Some(self.id) {
                    return fail(InvariantViolation::ParentLinkMismatch);
                }
                if !tiles(self.rect, a.rect, sep.boundary(), b.rect) {
                    return fail(InvariantViolation::ChildrenDoNotTile);
                }
                a.validate_into(seen)?;
                b.validate_into(seen)
            }
            _ => fail(InvariantViolation::PayloadChildrenMismatch),
        }
    }

    fn find_mut_or_err(&mut self, id: PaneId) -> Result<&mut PaneNode<P>, PaneError> {
        self.find_mut(id).ok_or(PaneError::UnknownPane { node: id })
    }
}

fn within(outer: Rect, inner: Rect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

fn tiles(parent: Rect, first: Rect, boundary: Rect, second: Rect) -> bool {
    within(parent, first)
        && within(parent, second)
        && within(parent, boundary)
        && first.area() + boundary.area() + second.area() == parent.area()
}

/// Owner of the root node, the sizing policy, and id allocation.
#[derive(Debug)]
pub struct PaneTree<P> {
    root: PaneNode<P>,
    config: SplitConfig,
    next_id: PaneId,
}

impl<P: Payload> PaneTree<P> {
    /// Tree with a single leaf covering `area`, using the default policy.
    pub fn new(area: Rect, payload: P) -> Self {
        Self::build(area, payload, SplitConfig::default())
    }

    /// Tree with a single leaf covering `area` and a custom policy.
    pub fn with_config(area: Rect, payload: P, config: SplitConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!(%err, "split config rejected");
            return Err(err);
        }
        Ok(Self::build(area, payload, config))
    }

    fn build(area: Rect, payload: P, config: SplitConfig) -> Self {
        let mut root = PaneNode::leaf(PaneId::MIN, None, payload);
        root.resize(area);
        Self {
            root,
            config,
            next_id: PaneId(PaneId::MIN.0 + 1),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Area covered by the root.
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.root.rect
    }

    #[must_use]
    pub const fn root(&self) -> &PaneNode<P> {
        &self.root
    }

    #[must_use]
    pub fn node(&self, id: PaneId) -> Option<&PaneNode<P>> {
        self.root.find(id)
    }

    pub fn node_mut(&mut self, id: PaneId) -> Option<&mut PaneNode<P>> {
        self.root.find_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: PaneId) -> bool {
        self.node(id).is_some()
    }

    #[must_use]
    pub fn payload(&self, id: PaneId) -> Option<&P> {
        self.node(id)?.payload()
    }

    pub fn payload_mut(&mut self, id: PaneId) -> Option<&mut P> {
        self.node_mut(id)?.payload_mut()
    }

    /// Parent of `id`, `None` for the root or an unknown id.
    #[must_use]
    pub fn parent_of(&self, id: PaneId) -> Option<PaneId> {
        self.node(id)?.parent()
    }

    #[must_use]
    pub fn leaf_ids(&self) -> Vec<PaneId> {
        self.root.leaf_ids()
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    #[must_use]
    pub fn leaf_at(&self, point: Point) -> Option<PaneId> {
        self.root.leaf_at(point)
    }

    #[must_use]
    pub fn separator_at(&self, point: Point) -> Option<PaneId> {
        self.root.separator_at(point)
    }

    /// Re-layout the whole tree into `area`.
    pub fn resize(&mut self, area: Rect) {
        self.root.resize(area);
    }

    /// Split leaf `id` along `axis`, placing `payload` at `index` (0 or 1;
    /// larger values clamp to 1).
    pub fn split(
        &mut self,
        id: PaneId,
        axis: SplitAxis,
        index: usize,
        payload: P,
    ) -> Result<SplitOutcome, PaneError> {
        let new_id = self.next_id;
        let kept_id = new_id.checked_next()?;
        let after = kept_id.checked_next()?;
        let config = self.config;
        let node = self.root.find_mut_or_err(id)?;
        let outcome = node.split_with(
            axis,
            Slot::from_index(index),
            payload,
            (new_id, kept_id),
            &config,
        )?;
        self.next_id = after;
        Ok(outcome)
    }

    /// Collapse internal node `id`.
    pub fn unsplit(&mut self, id: PaneId, recursive: bool) -> Result<UnsplitOutcome<P>, PaneError> {
        self.root.find_mut_or_err(id)?.unsplit(recursive)
    }

    /// Collapse the parent of leaf `id` into a leaf.
    ///
    /// The root has no parent, so this reports [`PaneError::NotSplit`] for it.
    pub fn unsplit_parent_of(&mut self, id: PaneId) -> Result<UnsplitOutcome<P>, PaneError> {
        let node = self.node(id).ok_or(PaneError::UnknownPane { node: id })?;
        let parent = node.parent().ok_or(PaneError::NotSplit { node: id })?;
        self.unsplit(parent, false)
    }

    /// Clear every split-in-progress guard.
    pub fn clear_split_guards(&mut self) {
        self.root.clear_split_guards();
    }

    /// Set the ratio of internal node `id` and re-layout its subtree.
    pub fn set_ratio(&mut self, id: PaneId, ratio: f64) -> Result<(), PaneError> {
        self.with_separator(id, |sep| {
            sep.set_ratio(ratio);
            true
        })
        .map(|_| ())
    }

    /// Begin dragging the separator of `id`, anchored at `pointer`.
    pub fn grab_separator(&mut self, id: PaneId, pointer: Point) -> Result<(), PaneError> {
        self.with_separator(id, |sep| {
            sep.grab(pointer);
            false
        })
        .map(|_| ())
    }

    /// Begin dragging the separator of `id` so the boundary tracks the
    /// pointer exactly.
    pub fn grab_separator_at_pointer(&mut self, id: PaneId) -> Result<(), PaneError> {
        self.with_separator(id, |sep| {
            sep.grab_at_pointer();
            false
        })
        .map(|_| ())
    }

    /// Move a grabbed separator. Returns whether the layout changed.
    pub fn drag_separator(&mut self, id: PaneId, pointer: Point) -> Result<bool, PaneError> {
        self.with_separator(id, |sep| sep.drag_to(pointer))
    }

    /// End a separator drag.
    pub fn release_separator(&mut self, id: PaneId) -> Result<(), PaneError> {
        self.with_separator(id, |sep| {
            sep.release();
            false
        })
        .map(|_| ())
    }

    fn with_separator(
        &mut self,
        id: PaneId,
        f: impl FnOnce(&mut Separator) -> bool,
    ) -> Result<bool, PaneError> {
        let node = self.root.find_mut_or_err(id)?;
        let Some(state) = node.split.as_mut() else {
            return Err(PaneError::NotSplit { node: id });
        };
        let changed = f(&mut state.separator);
        if changed {
            let rect = node.rect;
            node.resize(rect);
        }
        Ok(changed)
    }

    /// Paint the whole tree.
    pub fn render(&self, surface: &mut dyn RenderSurface, separator_color: Rgba) {
        self.root.render(surface, separator_color);
    }

    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), PaneError> {
        if self.root.parent.is_some() {
            return Err(PaneError::Invariant {
                node: self.root.id,
                violation: InvariantViolation::ParentLinkMismatch,
            });
        }
        self.root.validate_into(&mut HashSet::new())
    }
}
