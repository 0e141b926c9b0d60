#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! [`Rect`] uses unsigned surface coordinates (0-indexed, origin at
//! top-left) and backs every layout computation. [`Point`] and [`Polygon`]
//! are signed so pointer deltas and rotated hit-test shapes can leave the
//! positive quadrant before being translated back onto a rectangle.

/// A rectangle for layout bounds and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Shrink the size so `right()` and `bottom()` do not saturate.
    #[inline]
    #[must_use]
    pub const fn addressable(&self) -> Self {
        let width = if self.width > u16::MAX - self.x {
            u16::MAX - self.x
        } else {
            self.width
        };
        let height = if self.height > u16::MAX - self.y {
            u16::MAX - self.y
        } else {
            self.height
        };
        Self::new(self.x, self.y, width, height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Top-left corner as a signed point.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }

    /// Check if a cell is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if a signed point addresses a cell inside the rectangle.
    #[inline]
    pub const fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x as i32
            && point.x < self.right() as i32
            && point.y >= self.y as i32
            && point.y < self.bottom() as i32
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Create a new rectangle grown outward by the given margin.
    ///
    /// Edges saturate at the coordinate space bounds.
    pub fn outer(&self, margin: Sides) -> Rect {
        let x = self.x.saturating_sub(margin.left);
        let y = self.y.saturating_sub(margin.top);
        let right = self.right().saturating_add(margin.right);
        let bottom = self.bottom().saturating_add(margin.bottom);
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Sides for padding/margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    /// Create new sides with equal values.
    pub const fn all(val: u16) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with horizontal values only.
    pub const fn horizontal(val: u16) -> Self {
        Self {
            top: 0,
            right: val,
            bottom: 0,
            left: val,
        }
    }

    /// Create new sides with vertical values only.
    pub const fn vertical(val: u16) -> Self {
        Self {
            top: val,
            right: 0,
            bottom: val,
            left: 0,
        }
    }
}

/// A signed point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset of `self` relative to `origin`.
    #[inline]
    pub const fn delta_from(self, origin: Point) -> (i32, i32) {
        (
            self.x.saturating_sub(origin.x),
            self.y.saturating_sub(origin.y),
        )
    }

    /// Translate by the given offset.
    #[inline]
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Rotate about the origin by a whole number of quarter turns.
    ///
    /// Rotation is clockwise in screen space (y grows downward), so a
    /// point on the positive x axis lands on the positive y axis after
    /// [`QuarterTurn::Cw90`].
    #[inline]
    #[must_use]
    pub const fn rotated(self, turn: QuarterTurn) -> Self {
        match turn {
            QuarterTurn::Identity => self,
            QuarterTurn::Cw90 => Self::new(-self.y, self.x),
            QuarterTurn::Half => Self::new(-self.x, -self.y),
            QuarterTurn::Ccw90 => Self::new(self.y, -self.x),
        }
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(i32::from(x), i32::from(y))
    }
}

/// Rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuarterTurn {
    Identity,
    Cw90,
    Half,
    Ccw90,
}

/// A closed polygon with integer vertices.
///
/// Cell hit testing samples the centre of the addressed cell with the
/// even-odd rule, so a vertex lying on a rectangle edge never claims the
/// neighbouring cell outside it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from its vertices, in order.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the polygon has fewer than three vertices.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Rotate every vertex about the origin.
    #[must_use]
    pub fn rotated(&self, turn: QuarterTurn) -> Self {
        Self::new(self.points.iter().map(|p| p.rotated(turn)).collect())
    }

    /// Translate every vertex.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.points.iter().map(|p| p.translated(dx, dy)).collect())
    }

    /// Smallest `(min, max)` corner pair enclosing every vertex.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// Even-odd test for the cell addressed by `cell`.
    #[must_use]
    pub fn contains_cell(&self, cell: Point) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let px = f64::from(cell.x) + 0.5;
        let py = f64::from(cell.y) + 0.5;
        let mut inside = false;
        let mut prev = self.points[self.points.len() - 1];
        for &curr in &self.points {
            let (ax, ay) = (f64::from(prev.x), f64::from(prev.y));
            let (bx, by) = (f64::from(curr.x), f64::from(curr.y));
            if (ay > py) != (by > py) {
                let cross_x = ax + (py - ay) * (bx - ax) / (by - ay);
                if px < cross_x {
                    inside = !inside;
                }
            }
            prev = curr;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Polygon, QuarterTurn, Rect, Sides};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
    }

    #[test]
    fn rect_contains_point_rejects_negative() {
        let rect = Rect::new(0, 0, 4, 4);
        assert!(rect.contains_point(Point::new(0, 0)));
        assert!(!rect.contains_point(Point::new(-1, 0)));
        assert!(!rect.contains_point(Point::new(4, 1)));
    }

    #[test]
    fn rect_intersection_no_overlap_is_empty() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(3, 3, 2, 2);
        assert_eq!(a.intersection(&b), Rect::default());
    }

    #[test]
    fn addressable_trims_overhang() {
        let far = Rect::new(65500, 65530, 100, 10);
        assert_eq!(far.addressable(), Rect::new(65500, 65530, 35, 5));
        assert_eq!(far.addressable().area(), 175);
        let near = Rect::new(3, 4, 10, 10);
        assert_eq!(near.addressable(), near);
    }

    #[test]
    fn rect_outer_saturates_at_zero() {
        let rect = Rect::new(1, 5, 1, 10);
        assert_eq!(rect.outer(Sides::horizontal(2)), Rect::new(0, 5, 4, 10));
        assert_eq!(rect.outer(Sides::vertical(1)), Rect::new(1, 4, 1, 12));
    }

    #[test]
    fn quarter_turns_compose_to_identity() {
        let p = Point::new(3, -7);
        let back = p
            .rotated(QuarterTurn::Cw90)
            .rotated(QuarterTurn::Cw90)
            .rotated(QuarterTurn::Half);
        assert_eq!(back, p);
        assert_eq!(
            p.rotated(QuarterTurn::Cw90).rotated(QuarterTurn::Ccw90),
            p
        );
    }

    #[test]
    fn cw90_maps_x_axis_onto_y_axis() {
        assert_eq!(Point::new(5, 0).rotated(QuarterTurn::Cw90), Point::new(0, 5));
    }

    #[test]
    fn polygon_square_contains_interior_cells_only() {
        let square = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ]);
        assert!(square.contains_cell(Point::new(0, 0)));
        assert!(square.contains_cell(Point::new(3, 3)));
        assert!(!square.contains_cell(Point::new(4, 0)));
        assert!(!square.contains_cell(Point::new(-1, 2)));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = Polygon::new(vec![Point::new(0, 0), Point::new(5, 5)]);
        assert!(line.is_degenerate());
        assert!(!line.contains_cell(Point::new(1, 1)));
    }

    #[test]
    fn polygon_bounds_track_extremes() {
        let tri = Polygon::new(vec![Point::new(2, -1), Point::new(-3, 4), Point::new(0, 9)]);
        assert_eq!(tri.bounds(), Some((Point::new(-3, -1), Point::new(2, 9))));
        assert_eq!(Polygon::default().bounds(), None);
    }
}
