use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cmp;
use core::fmt;

use crate::coalesce::ScrollCoalescer;
use crate::range::RangeTracker;
use crate::scheduler::OffsetScheduler;
use crate::{
    Axis, Channel, CheckReport, ContentEdge, ContentTransform, CycleReport, DataSource, ListRange,
    Orientation, ScrollStrategy, Settle, Subscription, ViewportError, ViewportGeometry,
    ViewportOptions, ViewportSnapshot,
};

struct Attachment {
    source: Rc<dyn DataSource>,
    // Dropping the subscription unsubscribes from the source.
    lengths: Subscription<usize>,
}

/// A headless virtual-scroll viewport.
///
/// The viewport tracks which slice of a large list is rendered (`rendered_range`), how large the
/// whole list would be (`total_content_size`) and where the rendered slice sits inside the
/// scroll container (the content transform). It never decides *what* to render: that is the
/// injected [`ScrollStrategy`]'s job.
///
/// The host drives it once per frame:
///
/// 1. [`handle_scroll_event`](Self::handle_scroll_event) for every raw scroll event.
/// 2. [`frame`](Self::frame): picks up data-length changes and delivers at most one coalesced
///    scroll tick to the strategy, which reacts through the setters.
/// 3. [`check`](Self::check): the single flush point. Pending writes hit the geometry once.
/// 4. The host renders [`CheckReport::range`].
/// 5. [`settle`](Self::settle): releases the one "content rendered" notification of the cycle.
///
/// [`run_cycle`](Self::run_cycle) does 2, 3 and 5 in one go for hosts that render
/// synchronously.
pub struct Viewport {
    options: ViewportOptions,
    geometry: Box<dyn ViewportGeometry>,
    // `None` while a strategy callback runs (the strategy is checked out) and after destroy.
    strategy: Option<Box<dyn ScrollStrategy>>,
    ranges: RangeTracker,
    offsets: OffsetScheduler,
    scroll: ScrollCoalescer,
    attachment: Option<Attachment>,
    // Bumped on every detach; notifications taken under an older epoch are dropped.
    epoch: u64,
    data_length: usize,
    viewport_size: f64,
    range_changes: Channel<ListRange>,
    scrolled: Channel<f64>,
    detached: Channel<()>,
    destroyed: bool,
}

impl Viewport {
    /// Creates a viewport, measures its initial size and attaches `strategy` to it.
    ///
    /// The viewport starts without a data source; see [`attach`](Self::attach).
    pub fn new(
        options: ViewportOptions,
        geometry: impl ViewportGeometry + 'static,
        strategy: impl ScrollStrategy + 'static,
    ) -> Self {
        let axis = options.orientation.axis();
        let mut viewport = Self {
            options,
            geometry: Box::new(geometry),
            strategy: None,
            ranges: RangeTracker::new(),
            offsets: OffsetScheduler::new(axis),
            scroll: ScrollCoalescer::default(),
            attachment: None,
            epoch: 0,
            data_length: 0,
            viewport_size: 0.0,
            range_changes: Channel::new(),
            scrolled: Channel::new(),
            detached: Channel::new(),
            destroyed: false,
        };
        viewport.measure_viewport_size();
        vdebug!(
            orientation = ?options.orientation,
            viewport_size = viewport.viewport_size,
            "Viewport::new"
        );

        let mut strategy: Box<dyn ScrollStrategy> = Box::new(strategy);
        strategy.attach(&mut viewport);
        if viewport.destroyed {
            strategy.detach();
        } else {
            viewport.strategy = Some(strategy);
        }
        viewport
    }

    pub fn options(&self) -> &ViewportOptions {
        &self.options
    }

    pub fn orientation(&self) -> Orientation {
        self.options.orientation
    }

    fn axis(&self) -> Axis {
        self.options.orientation.axis()
    }

    // ---------------------------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------------------------

    /// Binds a data source and subscribes to its length changes.
    ///
    /// Fails with [`ViewportError::AlreadyAttached`] while another source is bound.
    pub fn attach(&mut self, source: Rc<dyn DataSource>) -> Result<(), ViewportError> {
        if self.destroyed {
            return Err(ViewportError::Destroyed);
        }
        if self.attachment.is_some() {
            vwarn!("Viewport::attach: a data source is already attached");
            return Err(ViewportError::AlreadyAttached);
        }
        let lengths = source.length_changes();
        self.attachment = Some(Attachment { source, lengths });
        vdebug!(epoch = self.epoch, "Viewport::attach");
        self.sync_data_length();
        Ok(())
    }

    /// Unbinds the data source. Safe to call when nothing is attached.
    ///
    /// Drops the length subscription, discards coalesced scroll events and cancels
    /// notifications that were scheduled but not yet released, then signals on
    /// [`detached`](Self::detached).
    pub fn detach(&mut self) {
        let Some(attachment) = self.attachment.take() else {
            return;
        };
        drop(attachment);
        self.epoch = self.epoch.wrapping_add(1);
        self.scroll.clear();
        self.offsets.cancel_notifications();
        vdebug!(epoch = self.epoch, "Viewport::detach");
        self.detached.emit(());
    }

    /// Detaches, detaches the strategy and completes every stream. Idempotent.
    ///
    /// After this, setters are no-ops and `attach` fails with [`ViewportError::Destroyed`].
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.detach();
        self.destroyed = true;
        self.scroll.clear();
        self.offsets.cancel_notifications();
        // A strategy that is checked out gets detached when its callback returns.
        if let Some(mut strategy) = self.strategy.take() {
            strategy.detach();
        }
        self.range_changes.complete();
        self.scrolled.complete();
        self.detached.complete();
        vdebug!("Viewport::destroy");
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // ---------------------------------------------------------------------------------------
    // Readers
    // ---------------------------------------------------------------------------------------

    pub fn data_length(&self) -> usize {
        self.data_length
    }

    pub fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    pub fn total_content_size(&self) -> f64 {
        self.ranges.total_content_size()
    }

    /// The last committed range. It may be ahead of what the host has rendered until the next
    /// check pass; see [`materialized_range`](Self::materialized_range).
    pub fn rendered_range(&self) -> ListRange {
        self.ranges.committed()
    }

    /// The range handed to the host at the last check pass.
    pub fn materialized_range(&self) -> ListRange {
        self.ranges.materialized()
    }

    /// The committed content translation (it reaches the geometry at the next check pass).
    pub fn content_transform(&self) -> ContentTransform {
        self.offsets.transform()
    }

    /// Offset from the start of the virtual content to the start of the rendered content.
    ///
    /// `None` while a trailing-edge offset waits to be converted after the next settle.
    pub fn offset_to_rendered_content_start(&self) -> Option<f64> {
        if self.offsets.offset_needs_rewrite() {
            return None;
        }
        Some(self.offsets.content_offset())
    }

    pub fn pending_scroll_offset(&self) -> Option<f64> {
        self.offsets.pending_scroll_offset()
    }

    /// Whether mutations are waiting for a check pass.
    pub fn needs_check(&self) -> bool {
        self.offsets.needs_check()
    }

    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            orientation: self.options.orientation,
            viewport_size: self.viewport_size,
            total_content_size: self.ranges.total_content_size(),
            data_length: self.data_length,
            rendered_range: self.ranges.committed(),
            materialized_range: self.ranges.materialized(),
            content_transform: self.offsets.transform(),
            pending_scroll_offset: self.offsets.pending_scroll_offset(),
            attached: self.attachment.is_some(),
            destroyed: self.destroyed,
        }
    }

    // ---------------------------------------------------------------------------------------
    // Streams
    // ---------------------------------------------------------------------------------------

    /// Emits every committed range change. Completes on destroy.
    pub fn rendered_range_changes(&self) -> Subscription<ListRange> {
        self.range_changes.subscribe()
    }

    /// Emits the measured scroll offset once per coalesced scroll tick. Completes on destroy.
    pub fn scrolled(&self) -> Subscription<f64> {
        self.scrolled.subscribe()
    }

    /// Emits once per detach. Completes on destroy.
    pub fn detached(&self) -> Subscription<()> {
        self.detached.subscribe()
    }

    // ---------------------------------------------------------------------------------------
    // Mutations (batched until the next check pass)
    // ---------------------------------------------------------------------------------------

    pub fn set_total_content_size(&mut self, size: f64) {
        if self.destroyed {
            return;
        }
        if !size.is_finite() || size < 0.0 {
            vwarn!(size, "set_total_content_size: ignoring invalid size");
            return;
        }
        if !self.ranges.set_total_content_size(size) {
            return;
        }
        vtrace!(size, "set_total_content_size");
        self.offsets.schedule_total_size(size);
    }

    /// Commits a new rendered range.
    ///
    /// No-op when `range` equals the current range. Otherwise publishes it on
    /// [`rendered_range_changes`](Self::rendered_range_changes) and schedules exactly one
    /// `on_content_rendered` for when the cycle settles, however many other mutations follow
    /// in the same cycle.
    pub fn set_rendered_range(&mut self, range: ListRange) {
        if self.destroyed {
            return;
        }
        let range = if self.options.append_only {
            ListRange::new(0, cmp::max(self.ranges.committed().end(), range.end()))
        } else {
            range
        };
        if range.end() > self.data_length {
            vwarn!(
                end = range.end(),
                data_length = self.data_length,
                "set_rendered_range: range ends past the data length"
            );
        }
        if !self.ranges.commit(range) {
            return;
        }
        vtrace!(start = range.start(), end = range.end(), "set_rendered_range");
        self.range_changes.emit(range);
        self.offsets.schedule_content_rendered();
    }

    /// Positions the rendered content `offset` pixels into the virtual content.
    ///
    /// With [`ContentEdge::ToEnd`] the offset positions the content's trailing edge: the
    /// transform gains a second component shifting the content back by its own size. After
    /// the next settle the viewport measures the content and rewrites the offset as an
    /// equivalent `ToStart` one.
    pub fn set_rendered_content_offset(
        &mut self,
        offset: f64,
        edge: ContentEdge,
    ) -> Result<(), ViewportError> {
        if self.destroyed {
            return Ok(());
        }
        if !offset.is_finite() {
            return Err(ViewportError::InvalidOffset(offset));
        }
        let offset = if self.options.append_only && edge == ContentEdge::ToStart {
            0.0
        } else {
            offset
        };
        let transform =
            ContentTransform::new(self.axis(), self.options.axis_sign() * offset, edge)?;
        if self
            .offsets
            .update_transform(transform, offset, edge == ContentEdge::ToEnd)
        {
            vtrace!(offset, edge = ?edge, "set_rendered_content_offset");
        }
        Ok(())
    }

    /// Requests a physical scroll position. The write happens once, at the next check pass,
    /// with the last value requested.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        if self.destroyed {
            return;
        }
        if !offset.is_finite() {
            vwarn!(offset, "set_scroll_offset: ignoring non-finite offset");
            return;
        }
        vtrace!(offset, "set_scroll_offset");
        self.offsets.schedule_scroll_offset(offset);
    }

    pub fn scroll_to_offset(&mut self, offset: f64) {
        self.set_scroll_offset(offset);
    }

    /// Asks the strategy to bring `index` into view.
    pub fn scroll_to_index(&mut self, index: usize) {
        if self.destroyed {
            return;
        }
        self.with_strategy(|strategy, viewport| strategy.scroll_to_index(viewport, index));
    }

    // ---------------------------------------------------------------------------------------
    // Measurements (always read live geometry)
    // ---------------------------------------------------------------------------------------

    pub fn measure_scroll_offset(&self) -> f64 {
        self.geometry.scroll_offset(self.axis())
    }

    pub fn measure_rendered_content_size(&self) -> f64 {
        self.geometry.rendered_content_size(self.axis())
    }

    /// Distance from the viewport's leading edge to the rendered content's leading edge, in
    /// content coordinates.
    pub fn measure_rendered_content_offset(&self) -> f64 {
        let axis = self.axis();
        let geometry = &self.geometry;
        geometry.content_start(axis) - geometry.viewport_start(axis)
            + geometry.scroll_offset(axis)
            - geometry.client_edge(axis)
    }

    /// Measures `range` through the data source.
    ///
    /// Returns 0 when no source is attached or `range` is empty. Fails with
    /// [`ViewportError::RangeNotRendered`] when `range` reaches outside the materialized range.
    pub fn measure_range_size(&self, range: ListRange) -> Result<f64, ViewportError> {
        let Some(attachment) = &self.attachment else {
            return Ok(0.0);
        };
        if range.is_empty() {
            return Ok(0.0);
        }
        if !self.ranges.is_materialized(range) {
            return Err(ViewportError::RangeNotRendered {
                requested: range,
                rendered: self.ranges.materialized(),
            });
        }
        Ok(attachment
            .source
            .measure_range_size(range, self.options.orientation))
    }

    fn measure_viewport_size(&mut self) {
        self.viewport_size = self.geometry.viewport_size(self.axis());
    }

    // ---------------------------------------------------------------------------------------
    // Host-driven cycle
    // ---------------------------------------------------------------------------------------

    /// Records one raw scroll event. Cheap; delivery happens in [`frame`](Self::frame).
    pub fn handle_scroll_event(&mut self) {
        if self.destroyed {
            return;
        }
        self.scroll.push();
    }

    /// Re-measures the viewport after a resize and lets the strategy recompute.
    pub fn check_viewport_size(&mut self) {
        if self.destroyed {
            return;
        }
        self.measure_viewport_size();
        vdebug!(viewport_size = self.viewport_size, "check_viewport_size");
        self.with_strategy(|strategy, viewport| strategy.on_data_length_changed(viewport));
    }

    /// Applies queued data-length notifications, notifying the strategy once per change.
    pub fn sync_data_length(&mut self) {
        if self.destroyed || self.strategy.is_none() {
            return;
        }
        loop {
            let Some(attachment) = &self.attachment else {
                return;
            };
            let Some(len) = attachment.lengths.try_recv() else {
                return;
            };
            if len == self.data_length {
                continue;
            }
            vdebug!(from = self.data_length, to = len, "data length changed");
            self.data_length = len;
            self.offsets.mark_for_check();
            self.with_strategy(|strategy, viewport| strategy.on_data_length_changed(viewport));
        }
    }

    /// The per-frame tick: syncs the data length, then delivers at most one coalesced scroll
    /// notification. Returns whether the strategy saw a scroll.
    pub fn frame(&mut self) -> bool {
        if self.destroyed || self.strategy.is_none() {
            return false;
        }
        self.sync_data_length();
        if !self.scroll.has_events() {
            return false;
        }
        let events = self.scroll.drain();
        debug_assert!(events > 0);
        let offset = self.measure_scroll_offset();
        vtrace!(events, offset, "coalesced scroll tick");
        self.scrolled.emit(offset);
        self.with_strategy(|strategy, viewport| strategy.on_content_scrolled(viewport))
    }

    /// The single flush point of a cycle: writes the content transform, total size and pending
    /// scroll offset to the geometry (each at most once) and materializes the committed range.
    pub fn check(&mut self) -> CheckReport {
        if self.destroyed || !self.offsets.needs_check() {
            return CheckReport::idle(self.ranges.materialized());
        }
        let axis = self.axis();
        let flush = self.offsets.flush(self.geometry.as_mut(), axis);
        let range_changed = self.ranges.materialize();
        let report = CheckReport {
            range: self.ranges.materialized(),
            range_changed,
            transform_written: flush.transform,
            total_size_written: flush.total_size,
            scroll_offset_written: flush.scroll_offset,
        };
        vtrace!(?report, "check");
        report
    }

    /// Releases the cycle's deferred notifications once no check work is pending.
    ///
    /// Mutations the strategy makes from these callbacks belong to the next cycle.
    pub fn settle(&mut self) -> Settle {
        if self.destroyed {
            return Settle::Quiet;
        }
        if self.strategy.is_none() {
            return Settle::Pending;
        }
        let Some(notes) = self.offsets.take_notifications() else {
            return Settle::Pending;
        };
        if !notes.content_rendered && !notes.offset_changed {
            return Settle::Quiet;
        }

        let epoch = self.epoch;
        if notes.content_rendered {
            vtrace!("on_content_rendered");
            self.with_strategy(|strategy, viewport| strategy.on_content_rendered(viewport));
        }
        if notes.offset_changed && !self.destroyed && self.epoch == epoch {
            if self.offsets.offset_needs_rewrite() {
                self.rewrite_trailing_offset();
            } else {
                self.with_strategy(|strategy, viewport| {
                    strategy.on_rendered_offset_changed(viewport)
                });
            }
        }
        Settle::Notified {
            content_rendered: notes.content_rendered,
            offset_changed: notes.offset_changed,
        }
    }

    /// `frame`, `check` and `settle` in sequence.
    pub fn run_cycle(&mut self) -> CycleReport {
        let scrolled = self.frame();
        let check = self.check();
        let settle = self.settle();
        CycleReport {
            scrolled,
            check,
            settle,
        }
    }

    /// Converts a settled trailing-edge offset into the equivalent leading-edge one.
    fn rewrite_trailing_offset(&mut self) {
        self.offsets.finish_rewrite();
        let offset = self.offsets.content_offset() - self.measure_rendered_content_size();
        if self
            .set_rendered_content_offset(offset, ContentEdge::ToStart)
            .is_err()
        {
            vwarn!(offset, "could not rewrite trailing content offset");
        }
    }

    /// Runs `f` with the strategy checked out. Returns `false` when it is already checked out
    /// (a nested dispatch from inside a strategy callback).
    fn with_strategy(&mut self, f: impl FnOnce(&mut dyn ScrollStrategy, &mut Self)) -> bool {
        let Some(mut strategy) = self.strategy.take() else {
            vwarn!("strategy is busy; dropping nested dispatch");
            return false;
        };
        f(strategy.as_mut(), self);
        if self.destroyed {
            strategy.detach();
        } else {
            self.strategy = Some(strategy);
        }
        true
    }
}

impl Drop for Viewport {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("options", &self.options)
            .field("viewport_size", &self.viewport_size)
            .field("data_length", &self.data_length)
            .field("rendered_range", &self.ranges.committed())
            .field("materialized_range", &self.ranges.materialized())
            .field("total_content_size", &self.ranges.total_content_size())
            .field("content_transform", &self.offsets.transform())
            .field("attached", &self.attachment.is_some())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}
