//! Renderer interface.

use crate::shapes::Shape;
use kurbo::Size;

/// Consumer of the visible shape list.
///
/// Implementations draw the shapes onto whatever surface the host provides.
/// The renderer is a pure sink: nothing flows back into the core.
pub trait Renderer {
    fn render(&mut self, shapes: &[Shape], viewport: Size);
}
