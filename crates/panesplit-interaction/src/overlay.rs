#![forbid(unsafe_code)]

//! Transient hint drawn over a pane during a corner gesture.
//!
//! The overlay is presentation only. It never takes part in hit testing,
//! so pointer events keep flowing to the gesture that created it. The
//! owning [`GestureController`](crate::GestureController) holds at most one
//! overlay and drops it on every exit path of the gesture.

use panesplit_core::geometry::{Point, Polygon, Rect};
use panesplit_core::surface::{RenderSurface, Rgba};
use panesplit_layout::DragDirection;

/// Colours used to paint a [`HintOverlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    /// Shade covering the whole pane.
    pub fill: Rgba,
    /// Arrow glyph colour.
    pub glyph: Rgba,
    /// Whether to draw the arrow glyph at all.
    pub show_glyph: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::new(0, 0, 0, 127),
            glyph: Rgba::rgb(0x99, 0x99, 0x99),
            show_glyph: true,
        }
    }
}

/// Semi-transparent shade with an optional direction arrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintOverlay {
    rect: Rect,
    direction: DragDirection,
    style: OverlayStyle,
}

impl HintOverlay {
    #[must_use]
    pub fn new(rect: Rect, direction: DragDirection, style: OverlayStyle) -> Self {
        Self {
            rect,
            direction,
            style,
        }
    }

    /// Area covered: always the owning pane's full rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub const fn direction(&self) -> DragDirection {
        self.direction
    }

    #[must_use]
    pub const fn style(&self) -> OverlayStyle {
        self.style
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn set_direction(&mut self, direction: DragDirection) {
        self.direction = direction;
    }

    /// Arrow glyph for the current direction, if one is drawn.
    #[must_use]
    pub fn arrow(&self) -> Option<Polygon> {
        if !self.style.show_glyph {
            return None;
        }
        arrow_polygon(self.rect, self.direction)
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.fill_rect(self.rect, self.style.fill);
        if let Some(arrow) = self.arrow() {
            surface.fill_polygon(&arrow, self.style.glyph);
        }
    }
}

/// Seven-point block arrow filling `rect`, pointing along `direction`.
///
/// Laid out on a grid of quarters along the pointing axis and fifths across
/// it: a shaft from the trailing edge to the middle, then a head whose tip
/// sits three quarters of the way along.
#[must_use]
pub fn arrow_polygon(rect: Rect, direction: DragDirection) -> Option<Polygon> {
    let (length, breadth) = match direction {
        DragDirection::None => return None,
        DragDirection::Left | DragDirection::Right => (rect.width, rect.height),
        DragDirection::Up | DragDirection::Down => (rect.height, rect.width),
    };
    let l = i32::from(length);
    let b = i32::from(breadth);
    let step = l / 4;
    let band = b / 5;
    // (along, across) for an arrow pointing toward +along.
    let local = [
        (3 * step, b / 2),
        (2 * step, 4 * band),
        (2 * step, 3 * band),
        (0, 3 * band),
        (0, 2 * band),
        (2 * step, 2 * band),
        (2 * step, band),
    ];
    let x0 = i32::from(rect.x);
    let y0 = i32::from(rect.y);
    let w = i32::from(rect.width);
    let h = i32::from(rect.height);
    let points = local
        .iter()
        .map(|&(along, across)| match direction {
            DragDirection::Right => Point::new(x0 + along, y0 + across),
            DragDirection::Left => Point::new(x0 + w - along, y0 + across),
            DragDirection::Down => Point::new(x0 + across, y0 + along),
            DragDirection::Up | DragDirection::None => Point::new(x0 + across, y0 + h - along),
        })
        .collect();
    Some(Polygon::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_arrow_matches_grid() {
        let arrow = arrow_polygon(Rect::from_size(40, 20), DragDirection::Right).unwrap();
        assert_eq!(
            arrow.points(),
            &[
                Point::new(30, 10),
                Point::new(20, 16),
                Point::new(20, 12),
                Point::new(0, 12),
                Point::new(0, 8),
                Point::new(20, 8),
                Point::new(20, 4),
            ]
        );
    }

    #[test]
    fn left_arrow_mirrors_right() {
        let rect = Rect::new(10, 5, 40, 20);
        let arrow = arrow_polygon(rect, DragDirection::Left).unwrap();
        assert_eq!(arrow.points()[0], Point::new(20, 15));
        assert!(arrow.contains_cell(Point::new(25, 15)));
        assert!(!arrow.contains_cell(Point::new(15, 15)));
    }

    #[test]
    fn vertical_arrows_use_height_as_length() {
        let rect = Rect::from_size(20, 40);
        let down = arrow_polygon(rect, DragDirection::Down).unwrap();
        assert_eq!(down.points()[0], Point::new(10, 30));
        let up = arrow_polygon(rect, DragDirection::Up).unwrap();
        assert_eq!(up.points()[0], Point::new(10, 10));
    }

    #[test]
    fn no_direction_no_arrow() {
        assert!(arrow_polygon(Rect::from_size(10, 10), DragDirection::None).is_none());
        let overlay = HintOverlay::new(
            Rect::from_size(10, 10),
            DragDirection::Left,
            OverlayStyle {
                show_glyph: false,
                ..OverlayStyle::default()
            },
        );
        assert!(overlay.arrow().is_none());
    }

    #[test]
    fn render_shades_then_draws_glyph() {
        #[derive(Default)]
        struct Calls {
            rects: Vec<(Rect, Rgba)>,
            polys: usize,
        }
        impl RenderSurface for Calls {
            fn bounds(&self) -> Rect {
                Rect::from_size(100, 100)
            }
            fn fill_rect(&mut self, rect: Rect, color: Rgba) {
                self.rects.push((rect, color));
            }
            fn fill_polygon(&mut self, _polygon: &Polygon, color: Rgba) {
                assert_eq!(color, Rgba::rgb(0x99, 0x99, 0x99));
                self.polys += 1;
            }
        }

        let rect = Rect::new(2, 3, 30, 10);
        let overlay = HintOverlay::new(rect, DragDirection::Up, OverlayStyle::default());
        let mut calls = Calls::default();
        overlay.render(&mut calls);
        assert_eq!(calls.rects, vec![(rect, Rgba::new(0, 0, 0, 127))]);
        assert_eq!(calls.polys, 1);
    }
}
