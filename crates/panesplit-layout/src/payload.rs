#![forbid(unsafe_code)]

//! Contract for the content hosted by a leaf pane.

use panesplit_core::geometry::Rect;
use panesplit_core::surface::RenderSurface;

/// Content placed in a leaf.
///
/// Both capabilities are required: a type that cannot paint itself or
/// cannot follow its pane's geometry is rejected when the tree is built.
pub trait Payload {
    /// Paint into `rect`, which is the owning leaf's current rectangle.
    fn render(&self, surface: &mut dyn RenderSurface, rect: Rect);

    /// The owning leaf was assigned a new rectangle.
    fn on_layout_changed(&mut self, rect: Rect);
}

impl<P: Payload + ?Sized> Payload for Box<P> {
    fn render(&self, surface: &mut dyn RenderSurface, rect: Rect) {
        (**self).render(surface, rect);
    }

    fn on_layout_changed(&mut self, rect: Rect) {
        (**self).on_layout_changed(rect);
    }
}
