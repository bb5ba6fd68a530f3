use crate::{Axis, ContentTransform};

/// The boundary between the viewport core and the host's rendering surface.
///
/// This is the only place the core touches physical layout. Per axis it reads the viewport
/// size, the rendered content size and the scroll offset, and it writes the scroll offset, the
/// content translation and the total (virtual) content size.
///
/// Implementations are expected to be cheap: reads are called on every measurement and are
/// never cached by the core.
pub trait ViewportGeometry {
    /// Inner size of the scroll container along `axis`.
    fn viewport_size(&self, axis: Axis) -> f64;

    /// Current physical scroll position along `axis`.
    fn scroll_offset(&self, axis: Axis) -> f64;

    /// Physical size of the rendered content container along `axis`.
    fn rendered_content_size(&self, axis: Axis) -> f64;

    /// Leading edge of the scroll container in surface coordinates.
    fn viewport_start(&self, axis: Axis) -> f64;

    /// Leading edge of the rendered content container in surface coordinates.
    fn content_start(&self, axis: Axis) -> f64;

    /// Border/client inset between the container's outer edge and its scrollable area.
    fn client_edge(&self, _axis: Axis) -> f64 {
        0.0
    }

    fn write_scroll_offset(&mut self, axis: Axis, offset: f64);

    fn write_content_transform(&mut self, transform: &ContentTransform);

    /// Sizes the spacer that gives the scroll container its full virtual extent.
    fn write_total_content_size(&mut self, axis: Axis, size: f64);
}
