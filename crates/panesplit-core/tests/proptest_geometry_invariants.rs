//! Property-based invariant tests for geometry primitives (Rect, Point, Polygon).
//!
//! 1. `contains` and `contains_point` agree for every cell.
//! 2. Intersection fits within both inputs.
//! 3. `outer` never shrinks a rectangle.
//! 4. Polygon hit testing is translation invariant.
//! 5. Rotating a polygon rotates its hit cells.

use panesplit_core::geometry::{Point, Polygon, QuarterTurn, Rect, Sides};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..=500, 0u16..=500, 0u16..=500, 0u16..=500).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn box_polygon(x: i32, y: i32, w: i32, h: i32) -> Polygon {
    Polygon::new(vec![
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ])
}

/// Cell that a cell maps to when its centre is rotated about the origin.
fn rotate_cell(cell: Point, turn: QuarterTurn) -> Point {
    match turn {
        QuarterTurn::Identity => cell,
        QuarterTurn::Cw90 => Point::new(-cell.y - 1, cell.x),
        QuarterTurn::Half => Point::new(-cell.x - 1, -cell.y - 1),
        QuarterTurn::Ccw90 => Point::new(cell.y, -cell.x - 1),
    }
}

fn turn_strategy() -> impl Strategy<Value = QuarterTurn> {
    prop_oneof![
        Just(QuarterTurn::Identity),
        Just(QuarterTurn::Cw90),
        Just(QuarterTurn::Half),
        Just(QuarterTurn::Ccw90),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. contains / contains_point agreement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contains_matches_contains_point(rect in small_rect_strategy(), x in 0u16..=1100, y in 0u16..=1100) {
        prop_assert_eq!(rect.contains(x, y), rect.contains_point(Point::from((x, y))));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Intersection fits within both inputs
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersection_within_inputs(a in small_rect_strategy(), b in small_rect_strategy()) {
        if let Some(i) = a.intersection_opt(&b) {
            prop_assert!(i.x >= a.x && i.x >= b.x);
            prop_assert!(i.right() <= a.right() && i.right() <= b.right());
            prop_assert!(i.bottom() <= a.bottom() && i.bottom() <= b.bottom());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. outer never shrinks
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn outer_contains_original(rect in small_rect_strategy(), margin in 0u16..=20) {
        let grown = rect.outer(Sides::all(margin));
        prop_assert!(grown.x <= rect.x && grown.y <= rect.y);
        prop_assert!(grown.right() >= rect.right() && grown.bottom() >= rect.bottom());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Translation invariance
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn polygon_hits_translate(
        w in 1i32..=30, h in 1i32..=30,
        dx in -50i32..=50, dy in -50i32..=50,
        cx in -5i32..=35, cy in -5i32..=35,
    ) {
        let poly = box_polygon(0, 0, w, h);
        let moved = poly.translated(dx, dy);
        let cell = Point::new(cx, cy);
        prop_assert_eq!(poly.contains_cell(cell), moved.contains_cell(cell.translated(dx, dy)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Rotation maps hit cells
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn polygon_hits_rotate(
        x in -10i32..=10, y in -10i32..=10,
        w in 1i32..=20, h in 1i32..=20,
        cx in -15i32..=35, cy in -15i32..=35,
        turn in turn_strategy(),
    ) {
        let poly = box_polygon(x, y, w, h);
        let cell = Point::new(cx, cy);
        prop_assert_eq!(
            poly.contains_cell(cell),
            poly.rotated(turn).contains_cell(rotate_cell(cell, turn)),
            "turn {:?} cell {:?}", turn, cell
        );
    }
}
