#![forbid(unsafe_code)]

//! Structural operation failures.

use std::fmt;

use crate::pane::PaneId;

/// Why a split, unsplit, or lookup was refused.
///
/// [`AlreadySplitting`](PaneError::AlreadySplitting) and
/// [`NotSplit`](PaneError::NotSplit) are expected during normal gesture
/// handling and are absorbed by the interaction layer; the others indicate a
/// caller addressing the wrong node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneError {
    /// A split was requested while the same press already split this node.
    AlreadySplitting { node: PaneId },
    /// Unsplit was requested on a node that cannot collapse.
    NotSplit { node: PaneId },
    /// Split was requested on an internal node.
    NotLeaf { node: PaneId },
    /// No node with this id exists in the tree.
    UnknownPane { node: PaneId },
    /// The id space is exhausted.
    IdOverflow { current: PaneId },
    /// Structural validation found a broken tree.
    Invariant {
        node: PaneId,
        violation: InvariantViolation,
    },
}

impl PaneError {
    /// Node the failure refers to.
    #[must_use]
    pub const fn node(&self) -> PaneId {
        match *self {
            Self::AlreadySplitting { node }
            | Self::NotSplit { node }
            | Self::NotLeaf { node }
            | Self::UnknownPane { node }
            | Self::Invariant { node, .. } => node,
            Self::IdOverflow { current } => current,
        }
    }

    /// Whether a gesture that triggered this failure should simply be dropped.
    #[must_use]
    pub const fn is_benign(&self) -> bool {
        matches!(self, Self::AlreadySplitting { .. } | Self::NotSplit { .. })
    }
}

impl fmt::Display for PaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySplitting { node } => {
                write!(f, "node {} is already splitting", node.get())
            }
            Self::NotSplit { node } => write!(f, "node {} has no leaf pair to collapse", node.get()),
            Self::NotLeaf { node } => write!(f, "node {} is not a leaf", node.get()),
            Self::UnknownPane { node } => write!(f, "node {} does not exist", node.get()),
            Self::IdOverflow { current } => {
                write!(f, "pane id overflow after {}", current.get())
            }
            Self::Invariant { node, violation } => {
                write!(f, "node {} violates tree invariant: {violation}", node.get())
            }
        }
    }
}

impl std::error::Error for PaneError {}

/// Broken structural rule reported by [`PaneTree::validate`](crate::PaneTree::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Node holds both a payload and children, or neither.
    PayloadChildrenMismatch,
    /// Child's parent link does not point at its parent.
    ParentLinkMismatch,
    /// Child rectangles do not tile the parent rectangle.
    ChildrenDoNotTile,
    /// Separator ratio is outside the configured clamp.
    RatioOutOfRange,
    /// The same id appears twice.
    DuplicateId,
    /// Split guard set on a leaf.
    GuardOnLeaf,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::PayloadChildrenMismatch => "payload present iff leaf",
            Self::ParentLinkMismatch => "parent link mismatch",
            Self::ChildrenDoNotTile => "children do not tile parent",
            Self::RatioOutOfRange => "separator ratio out of range",
            Self::DuplicateId => "duplicate id",
            Self::GuardOnLeaf => "split guard set on a leaf",
        };
        f.write_str(text)
    }
}
