#![forbid(unsafe_code)]

//! Corner hot-spots and drag classification.
//!
//! Every pane exposes four small pentagonal regions, one per corner. A press
//! inside one of them followed by a drag either splits the pane (dragging
//! inward) or proposes collapsing it into its sibling (dragging outward).
//!
//! The top-left pentagon for corner size `c` has vertices
//! `(0,0) (c,0) (c - c/7, 2c/7) (2c/7, c - c/7) (0,c)`: a right-angle
//! triangle with its hypotenuse pushed outward. The other three corners are
//! that same shape rotated onto their corner.

use panesplit_core::geometry::{Point, Polygon, QuarterTurn, Rect};
use serde::{Deserialize, Serialize};

/// Default corner size in surface units.
pub const DEFAULT_CORNER_SIZE: u16 = 14;

/// One of the four corners of a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Hit-test order: when regions overlap on tiny panes, the earlier wins.
    pub const HIT_ORDER: [Corner; 4] = [
        Corner::TopLeft,
        Corner::BottomLeft,
        Corner::TopRight,
        Corner::BottomRight,
    ];

    fn placement(self, rect: Rect) -> (QuarterTurn, i32, i32) {
        let w = i32::from(rect.width);
        let h = i32::from(rect.height);
        match self {
            Corner::TopLeft => (QuarterTurn::Identity, 0, 0),
            Corner::TopRight => (QuarterTurn::Cw90, w, 0),
            Corner::BottomLeft => (QuarterTurn::Ccw90, 0, h),
            Corner::BottomRight => (QuarterTurn::Half, w, h),
        }
    }
}

/// The four corner polygons of one pane, in surface coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CornerRegions {
    pub top_left: Polygon,
    pub top_right: Polygon,
    pub bottom_left: Polygon,
    pub bottom_right: Polygon,
}

impl CornerRegions {
    /// Polygon for a given corner.
    #[must_use]
    pub fn get(&self, corner: Corner) -> &Polygon {
        match corner {
            Corner::TopLeft => &self.top_left,
            Corner::TopRight => &self.top_right,
            Corner::BottomLeft => &self.bottom_left,
            Corner::BottomRight => &self.bottom_right,
        }
    }

    /// First corner (in [`Corner::HIT_ORDER`]) whose region contains `point`.
    #[must_use]
    pub fn hit(&self, point: Point) -> Option<Corner> {
        Corner::HIT_ORDER
            .into_iter()
            .find(|&corner| self.get(corner).contains_cell(point))
    }
}

/// Smallest corner size whose four regions each claim a cell.
///
/// At size 1 the top-left hypotenuse crosses the centre of its only cell,
/// so only the right-hand corners would fill.
pub const MIN_EFFECTIVE_CORNER_SIZE: u16 = 2;

/// Corner size actually used for `rect`.
///
/// Shrinks to a quarter of the shorter side so the four regions never touch
/// and never leave the pane. Below [`MIN_EFFECTIVE_CORNER_SIZE`] the pane has
/// no corner regions at all.
#[must_use]
pub fn effective_corner_size(rect: Rect, corner_size: u16) -> u16 {
    let size = corner_size.min(rect.width / 4).min(rect.height / 4);
    if size < MIN_EFFECTIVE_CORNER_SIZE { 0 } else { size }
}

/// Top-left pentagon anchored at the origin.
#[must_use]
pub fn base_corner_shape(corner_size: u16) -> Polygon {
    let c = i32::from(corner_size);
    Polygon::new(vec![
        Point::new(0, 0),
        Point::new(c, 0),
        Point::new(c - c / 7, 2 * c / 7),
        Point::new(2 * c / 7, c - c / 7),
        Point::new(0, c),
    ])
}

/// Compute the four corner regions of `rect`.
#[must_use]
pub fn corner_regions(rect: Rect, corner_size: u16) -> CornerRegions {
    let base = base_corner_shape(effective_corner_size(rect, corner_size));
    let origin = rect.origin();
    let place = |corner: Corner| {
        let (turn, dx, dy) = corner.placement(rect);
        base.rotated(turn)
            .translated(dx, dy)
            .translated(origin.x, origin.y)
    };
    CornerRegions {
        top_left: place(Corner::TopLeft),
        top_right: place(Corner::TopRight),
        bottom_left: place(Corner::BottomLeft),
        bottom_right: place(Corner::BottomRight),
    }
}

/// Dominant direction of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragDirection {
    None,
    Left,
    Right,
    Up,
    Down,
}

/// Classify the motion from `origin` to `current`.
///
/// The axis with the larger magnitude wins; an exact diagonal counts as
/// horizontal. No motion at all is [`DragDirection::None`].
#[must_use]
pub fn classify_drag(origin: Point, current: Point) -> DragDirection {
    let (dx, dy) = current.delta_from(origin);
    if dx == 0 && dy == 0 {
        return DragDirection::None;
    }
    if dx.unsigned_abs() >= dy.unsigned_abs() {
        if dx > 0 {
            DragDirection::Right
        } else {
            DragDirection::Left
        }
    } else if dy > 0 {
        DragDirection::Down
    } else {
        DragDirection::Up
    }
}
