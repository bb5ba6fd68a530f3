use crate::Viewport;

/// A pluggable windowing policy.
///
/// The viewport never decides which items to render; it forwards lifecycle, scroll and data
/// events here and the strategy answers by calling back into the viewport
/// (`set_rendered_range`, `set_total_content_size`, `set_rendered_content_offset`,
/// `set_scroll_offset`).
///
/// Every callback receives the viewport mutably instead of the strategy keeping a reference to
/// it. While a callback runs, the strategy is checked out of the viewport: viewport calls that
/// would dispatch to the strategy again (for example `scroll_to_index`) are dropped.
pub trait ScrollStrategy {
    /// Called once, right after the viewport measured its initial size.
    fn attach(&mut self, viewport: &mut Viewport);

    /// Called once when the viewport is destroyed.
    fn detach(&mut self);

    /// Called at most once per frame after the container scrolled.
    fn on_content_scrolled(&mut self, viewport: &mut Viewport);

    /// Called when the bound data source reports a new item count, and after a resize.
    fn on_data_length_changed(&mut self, viewport: &mut Viewport);

    /// Called once per settled cycle after a range change, when post-render geometry can be
    /// measured.
    fn on_content_rendered(&mut self, viewport: &mut Viewport);

    /// Called once the written content translation has settled.
    fn on_rendered_offset_changed(&mut self, _viewport: &mut Viewport) {}

    /// Scrolls so the item at `index` becomes visible. Strategies that cannot map indexes to
    /// offsets may ignore this.
    fn scroll_to_index(&mut self, _viewport: &mut Viewport, _index: usize) {}
}
