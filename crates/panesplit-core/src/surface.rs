#![forbid(unsafe_code)]

//! Minimal drawing contract shared by payloads and overlays.

use crate::geometry::{Polygon, Rect};

/// Straight (non-premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a colour from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Whether the colour is fully opaque.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Composite `self` over an opaque `dst` colour.
    #[must_use]
    pub fn over(self, dst: Rgba) -> Rgba {
        let alpha = u16::from(self.a);
        let inv = 255 - alpha;
        let mix = |src: u8, dst: u8| -> u8 {
            let blended = (u16::from(src) * alpha + u16::from(dst) * inv + 127) / 255;
            // blended <= 255 because alpha + inv == 255
            blended as u8
        };
        Rgba::rgb(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }
}

/// Something panes and overlays can paint into.
///
/// Coordinates are surface coordinates; implementations clip to
/// [`bounds`](RenderSurface::bounds).
pub trait RenderSurface {
    /// Paintable area.
    fn bounds(&self) -> Rect;

    /// Fill a rectangle, blending when `color` is translucent.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Fill the cells whose centres fall inside `polygon`.
    fn fill_polygon(&mut self, polygon: &Polygon, color: Rgba);
}
