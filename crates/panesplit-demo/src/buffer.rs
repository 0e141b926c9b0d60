#![forbid(unsafe_code)]

//! Cell grid the demo paints into before flushing to the terminal.
//!
//! Every cell is one background colour. Translucent fills are composited
//! over what is already there, which is how the hint overlay darkens the
//! pane beneath it.

use std::io::{self, Write};

use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue};
use panesplit::{Point, Polygon, Rect, RenderSurface, Rgba};

/// Background colour of cells nothing painted.
pub const CLEAR: Rgba = Rgba::rgb(0, 0, 0);

#[derive(Debug, Clone)]
pub struct CellBuffer {
    width: u16,
    height: u16,
    cells: Vec<Rgba>,
}

impl CellBuffer {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![CLEAR; len],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Colour at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<Rgba> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Reallocate for a new terminal size, clearing every cell.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.cells.fill(CLEAR);
    }

    /// Write the grid to `out` as coloured spaces, with `status` on the
    /// last row.
    pub fn flush(&self, out: &mut impl Write, status: &str) -> io::Result<()> {
        for y in 0..self.height {
            queue!(out, cursor::MoveTo(0, y))?;
            let mut current = None;
            for x in 0..self.width {
                let Some(color) = self.get(x, y) else {
                    continue;
                };
                if current != Some(color) {
                    queue!(out, SetBackgroundColor(to_terminal(color)))?;
                    current = Some(color);
                }
                queue!(out, Print(' '))?;
            }
        }
        if self.height > 0 {
            let line: String = status.chars().take(usize::from(self.width)).collect();
            queue!(
                out,
                cursor::MoveTo(0, self.height - 1),
                SetForegroundColor(Color::White),
                SetBackgroundColor(Color::Black),
                Print(line),
            )?;
        }
        queue!(out, ResetColor)?;
        out.flush()
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    fn blend(&mut self, x: u16, y: u16, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            let dst = self.cells[idx];
            self.cells[idx] = if color.is_opaque() {
                color
            } else {
                color.over(dst)
            };
        }
    }
}

impl RenderSurface for CellBuffer {
    fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let clipped = rect.intersection(&self.bounds());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.blend(x, y, color);
            }
        }
    }

    fn fill_polygon(&mut self, polygon: &Polygon, color: Rgba) {
        let Some((min, max)) = polygon.bounds() else {
            return;
        };
        let clamp = |v: i32, hi: u16| v.clamp(0, i32::from(hi)) as u16;
        let (x0, x1) = (clamp(min.x, self.width), clamp(max.x, self.width));
        let (y0, y1) = (clamp(min.y, self.height), clamp(max.y, self.height));
        for y in y0..y1 {
            for x in x0..x1 {
                let cell = Point::new(i32::from(x), i32::from(y));
                if polygon.contains_cell(cell) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

fn to_terminal(color: Rgba) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fill_rect_clips_to_grid() {
        let mut buf = CellBuffer::new(4, 3);
        buf.fill_rect(Rect::new(2, 1, 10, 10), Rgba::rgb(9, 9, 9));
        assert_eq!(buf.get(1, 1), Some(CLEAR));
        assert_eq!(buf.get(3, 2), Some(Rgba::rgb(9, 9, 9)));
        assert_eq!(buf.get(4, 2), None);
    }

    #[test]
    fn translucent_fill_darkens() {
        let mut buf = CellBuffer::new(2, 2);
        buf.fill_rect(buf.bounds(), Rgba::rgb(255, 255, 255));
        buf.fill_rect(buf.bounds(), Rgba::new(0, 0, 0, 127));
        assert_eq!(buf.get(0, 0), Some(Rgba::rgb(128, 128, 128)));
    }

    #[test]
    fn polygon_fill_uses_cell_centres() {
        let mut buf = CellBuffer::new(6, 6);
        let square = Polygon::new(vec![
            Point::new(1, 1),
            Point::new(4, 1),
            Point::new(4, 4),
            Point::new(1, 4),
        ]);
        buf.fill_polygon(&square, Rgba::rgb(1, 2, 3));
        assert_eq!(buf.get(1, 1), Some(Rgba::rgb(1, 2, 3)));
        assert_eq!(buf.get(3, 3), Some(Rgba::rgb(1, 2, 3)));
        assert_eq!(buf.get(4, 4), Some(CLEAR));
        assert_eq!(buf.get(0, 0), Some(CLEAR));
    }

    #[test]
    fn flush_emits_status_line() {
        let mut buf = CellBuffer::new(8, 2);
        buf.fill_rect(buf.bounds(), Rgba::rgb(10, 20, 30));
        let mut out = Vec::new();
        buf.flush(&mut out, "hello").unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("hello"));
    }

    #[test]
    fn resize_clears() {
        let mut buf = CellBuffer::new(2, 2);
        buf.fill_rect(buf.bounds(), Rgba::rgb(5, 5, 5));
        buf.resize(3, 1);
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.get(2, 0), Some(CLEAR));
    }
}
