#![forbid(unsafe_code)]

//! Draggable boundary between the two children of an internal node.
//!
//! A separator owns the split ratio. The ratio is the first child's share
//! of the extent left after removing the separator thickness, and it is
//! always kept inside `[min_fraction, 1 - min_fraction]`.

use panesplit_core::cursor::CursorShape;
use panesplit_core::geometry::{Point, Rect, Sides};

use crate::config::{SplitConfig, clamp_ratio};
use crate::pane::SplitAxis;

/// Separator of one internal node.
#[derive(Debug, Clone, PartialEq)]
pub struct Separator {
    axis: SplitAxis,
    ratio: f64,
    min_fraction: f64,
    thickness: u16,
    grab_margin: u16,
    bounds: Rect,
    boundary: Rect,
    grab_offset: Option<i32>,
}

impl Separator {
    pub(crate) fn new(axis: SplitAxis, ratio: f64, config: &SplitConfig) -> Self {
        Self {
            axis,
            ratio: clamp_ratio(ratio, config.min_pane_fraction),
            min_fraction: config.min_pane_fraction,
            thickness: config.separator_thickness,
            grab_margin: config.grab_margin,
            bounds: Rect::default(),
            boundary: Rect::default(),
            grab_offset: None,
        }
    }

    /// Axis along which the parent is divided.
    #[must_use]
    pub const fn axis(&self) -> SplitAxis {
        self.axis
    }

    /// First child's share.
    #[must_use]
    pub const fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Separator thickness in cells.
    #[must_use]
    pub const fn thickness(&self) -> u16 {
        self.thickness
    }

    /// Cells the separator paints. Zero-sized when thickness is zero.
    #[must_use]
    pub const fn boundary(&self) -> Rect {
        self.boundary
    }

    /// Cells that grab the separator: the boundary grown by the grab margin
    /// across the split axis, clipped to the parent.
    #[must_use]
    pub fn grab_region(&self) -> Rect {
        let margin = match self.axis {
            SplitAxis::Horizontal => Sides::horizontal(self.grab_margin),
            SplitAxis::Vertical => Sides::vertical(self.grab_margin),
        };
        self.boundary
            .outer(margin)
            .intersection(&self.bounds)
    }

    /// Whether `point` grabs this separator.
    #[must_use]
    pub fn hit(&self, point: Point) -> bool {
        self.grab_region().contains_point(point)
    }

    /// Cursor shown while hovering or dragging the separator.
    #[must_use]
    pub const fn cursor(&self) -> CursorShape {
        match self.axis {
            SplitAxis::Horizontal => CursorShape::SplitHorizontal,
            SplitAxis::Vertical => CursorShape::SplitVertical,
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_grabbed(&self) -> bool {
        self.grab_offset.is_some()
    }

    /// Set the ratio, clamped. Takes effect on the next partition.
    pub fn set_ratio(&mut self, ratio: f64) {
        self.ratio = clamp_ratio(ratio, self.min_fraction);
    }

    /// Start a drag, keeping the grab point's offset from the boundary.
    pub fn grab(&mut self, pointer: Point) {
        self.grab_offset = Some(self.along(pointer) - self.boundary_start());
    }

    /// Start a drag that makes the boundary follow the pointer directly.
    pub fn grab_at_pointer(&mut self) {
        self.grab_offset = Some(0);
    }

    /// End a drag.
    pub fn release(&mut self) {
        self.grab_offset = None;
    }

    /// Move the boundary toward `pointer`. Returns whether the ratio changed.
    pub fn drag_to(&mut self, pointer: Point) -> bool {
        let Some(offset) = self.grab_offset else {
            return false;
        };
        let avail = self.available();
        if avail == 0 {
            return false;
        }
        let start = self.along(pointer) - offset - self.bounds_start();
        let ratio = clamp_ratio(f64::from(start) / f64::from(avail), self.min_fraction);
        if (ratio - self.ratio).abs() < f64::EPSILON {
            return false;
        }
        self.ratio = ratio;
        true
    }

    /// Divide `rect` into `(first, second)` and remember the geometry for hit
    /// testing.
    ///
    /// Sizes are integral: the first child gets `round(avail * ratio)` cells,
    /// kept in `[1, avail - 1]` whenever there are at least two cells to share.
    pub(crate) fn partition(&mut self, rect: Rect) -> (Rect, Rect) {
        self.bounds = rect;
        let extent = self.extent();
        let thickness = self.thickness.min(extent);
        let avail = extent - thickness;
        let mut first = (f64::from(avail) * self.ratio).round() as u16;
        if avail >= 2 {
            first = first.clamp(1, avail - 1);
        } else {
            first = first.min(avail);
        }
        let second = avail - first;
        match self.axis {
            SplitAxis::Horizontal => {
                let sep_x = rect.x.saturating_add(first);
                self.boundary = Rect::new(sep_x, rect.y, thickness, rect.height);
                (
                    Rect::new(rect.x, rect.y, first, rect.height),
                    Rect::new(sep_x.saturating_add(thickness), rect.y, second, rect.height),
                )
            }
            SplitAxis::Vertical => {
                let sep_y = rect.y.saturating_add(first);
                self.boundary = Rect::new(rect.x, sep_y, rect.width, thickness);
                (
                    Rect::new(rect.x, rect.y, rect.width, first),
                    Rect::new(rect.x, sep_y.saturating_add(thickness), rect.width, second),
                )
            }
        }
    }

    pub(crate) const fn min_fraction(&self) -> f64 {
        self.min_fraction
    }

    fn extent(&self) -> u16 {
        match self.axis {
            SplitAxis::Horizontal => self.bounds.width,
            SplitAxis::Vertical => self.bounds.height,
        }
    }

    fn available(&self) -> u16 {
        let extent = self.extent();
        extent - self.thickness.min(extent)
    }

    fn along(&self, point: Point) -> i32 {
        match self.axis {
            SplitAxis::Horizontal => point.x,
            SplitAxis::Vertical => point.y,
        }
    }

    fn bounds_start(&self) -> i32 {
        match self.axis {
            SplitAxis::Horizontal => i32::from(self.bounds.x),
            SplitAxis::Vertical => i32::from(self.bounds.y),
        }
    }

    fn boundary_start(&self) -> i32 {
        match self.axis {
            SplitAxis::Horizontal => i32::from(self.boundary.x),
            SplitAxis::Vertical => i32::from(self.boundary.y),
        }
    }
}
