use virtual_viewport::{Channel, ContentEdge, ListRange, ScrollStrategy, Subscription, Viewport};

use crate::FixedSizeError;

/// A windowing strategy for lists whose items all have the same size.
///
/// Renders the visible items plus a buffer on either side. The buffer is refilled lazily: once
/// less than `min_buffer_px` of rendered content remains beyond an edge of the viewport, the
/// range is extended so that at least `max_buffer_px` is rendered there again.
///
/// The index of the first visible item is published on
/// [`scrolled_index_changes`](Self::scrolled_index_changes), without repeats. Subscribe before
/// handing the strategy to [`Viewport::new`].
#[derive(Debug)]
pub struct FixedSizeStrategy {
    item_size: f64,
    min_buffer_px: f64,
    max_buffer_px: f64,
    scrolled_index: Channel<usize>,
    last_index: Option<usize>,
}

impl FixedSizeStrategy {
    pub fn new(
        item_size: f64,
        min_buffer_px: f64,
        max_buffer_px: f64,
    ) -> Result<Self, FixedSizeError> {
        if !item_size.is_finite() || item_size <= 0.0 {
            return Err(FixedSizeError::InvalidItemSize(item_size));
        }
        for buffer in [min_buffer_px, max_buffer_px] {
            if !buffer.is_finite() || buffer < 0.0 {
                return Err(FixedSizeError::InvalidBuffer(buffer));
            }
        }
        if max_buffer_px < min_buffer_px {
            return Err(FixedSizeError::BufferOrder {
                min: min_buffer_px,
                max: max_buffer_px,
            });
        }
        Ok(Self {
            item_size,
            min_buffer_px,
            max_buffer_px,
            scrolled_index: Channel::new(),
            last_index: None,
        })
    }

    pub fn item_size(&self) -> f64 {
        self.item_size
    }

    pub fn min_buffer_px(&self) -> f64 {
        self.min_buffer_px
    }

    pub fn max_buffer_px(&self) -> f64 {
        self.max_buffer_px
    }

    /// Index of the first visible item, emitted whenever it changes. Completes on detach.
    pub fn scrolled_index_changes(&self) -> Subscription<usize> {
        self.scrolled_index.subscribe()
    }

    fn update_total_content_size(&self, viewport: &mut Viewport) {
        viewport.set_total_content_size(viewport.data_length() as f64 * self.item_size);
    }

    fn update_rendered_range(&mut self, viewport: &mut Viewport) {
        let item = self.item_size;
        let rendered = viewport.rendered_range();
        let (mut start, mut end) = (rendered.start(), rendered.end());
        let viewport_size = viewport.viewport_size();
        let data_length = viewport.data_length();
        let mut scroll_offset = viewport.measure_scroll_offset();
        let mut first_visible = scroll_offset / item;

        // The data shrank under the rendered range: pull the window back inside the list.
        if end > data_length {
            let max_visible = libm::ceil(viewport_size / item) as usize;
            let clamped = first_visible
                .min(data_length.saturating_sub(max_visible) as f64)
                .max(0.0);
            if first_visible != clamped {
                first_visible = clamped;
                scroll_offset = clamped * item;
                start = libm::floor(clamped) as usize;
            }
            end = data_length.min(start.saturating_add(max_visible));
        }

        let start_buffer = scroll_offset - start as f64 * item;
        if start_buffer < self.min_buffer_px && start != 0 {
            let expand_start = libm::ceil((self.max_buffer_px - start_buffer) / item) as usize;
            start = start.saturating_sub(expand_start);
            let visible_end =
                libm::ceil(first_visible + (viewport_size + self.min_buffer_px) / item);
            end = data_length.min(visible_end.max(0.0) as usize);
        } else {
            let end_buffer = end as f64 * item - (scroll_offset + viewport_size);
            if end_buffer < self.min_buffer_px && end != data_length {
                let expand_end = libm::ceil((self.max_buffer_px - end_buffer) / item);
                if expand_end > 0.0 {
                    end = data_length.min(end.saturating_add(expand_end as usize));
                    let lead = libm::floor(first_visible - self.min_buffer_px / item);
                    start = lead.max(0.0) as usize;
                }
            }
        }

        let range = ListRange::new(start.min(end), end);
        vtrace!(
            start = range.start(),
            end = range.end(),
            scroll_offset,
            "fixed-size range"
        );
        viewport.set_rendered_range(range);
        let offset = libm::round(item * range.start() as f64);
        if viewport
            .set_rendered_content_offset(offset, ContentEdge::ToStart)
            .is_err()
        {
            vwarn!(offset, start = range.start(), "fixed-size content offset rejected");
        }

        let index = libm::floor(first_visible).max(0.0) as usize;
        if self.last_index != Some(index) {
            self.last_index = Some(index);
            self.scrolled_index.emit(index);
        }
    }
}

impl ScrollStrategy for FixedSizeStrategy {
    fn attach(&mut self, viewport: &mut Viewport) {
        vdebug!(
            item_size = self.item_size,
            min_buffer_px = self.min_buffer_px,
            max_buffer_px = self.max_buffer_px,
            "FixedSizeStrategy::attach"
        );
        self.update_total_content_size(viewport);
        self.update_rendered_range(viewport);
    }

    fn detach(&mut self) {
        self.scrolled_index.complete();
    }

    fn on_content_scrolled(&mut self, viewport: &mut Viewport) {
        self.update_rendered_range(viewport);
    }

    fn on_data_length_changed(&mut self, viewport: &mut Viewport) {
        self.update_total_content_size(viewport);
        self.update_rendered_range(viewport);
    }

    fn on_content_rendered(&mut self, _viewport: &mut Viewport) {}

    fn scroll_to_index(&mut self, viewport: &mut Viewport, index: usize) {
        viewport.scroll_to_offset(index as f64 * self.item_size);
    }
}
