use crate::{Axis, ContentTransform, ListRange, ViewportGeometry};

/// Batches the viewport's physical writes and its deferred strategy notifications.
///
/// Setters only record intent here. A check pass (`flush`) performs each pending physical
/// write at most once, using the last value recorded. Notifications are released by
/// `take_notifications` only when no check work is outstanding.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OffsetScheduler {
    transform: ContentTransform,
    /// Logical offset last passed to `set_rendered_content_offset` (before RTL sign flip).
    content_offset: f64,
    offset_needs_rewrite: bool,
    transform_dirty: bool,
    pending_total_size: Option<f64>,
    pending_scroll_offset: Option<f64>,
    needs_check: bool,
    content_rendered_pending: bool,
    offset_changed_pending: bool,
}

/// Physical writes performed by one check pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Flush {
    pub(crate) transform: Option<ContentTransform>,
    pub(crate) total_size: Option<f64>,
    pub(crate) scroll_offset: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Notifications {
    pub(crate) content_rendered: bool,
    pub(crate) offset_changed: bool,
}

impl OffsetScheduler {
    pub(crate) fn new(axis: Axis) -> Self {
        Self {
            transform: ContentTransform::identity(axis),
            content_offset: 0.0,
            offset_needs_rewrite: false,
            transform_dirty: false,
            pending_total_size: None,
            pending_scroll_offset: None,
            needs_check: false,
            content_rendered_pending: false,
            offset_changed_pending: false,
        }
    }

    pub(crate) fn transform(&self) -> ContentTransform {
        self.transform
    }

    pub(crate) fn content_offset(&self) -> f64 {
        self.content_offset
    }

    pub(crate) fn offset_needs_rewrite(&self) -> bool {
        self.offset_needs_rewrite
    }

    pub(crate) fn pending_scroll_offset(&self) -> Option<f64> {
        self.pending_scroll_offset
    }

    pub(crate) fn needs_check(&self) -> bool {
        self.needs_check
    }

    pub(crate) fn mark_for_check(&mut self) {
        self.needs_check = true;
    }

    /// Records the content translation. Returns `false` when the transform is unchanged.
    pub(crate) fn update_transform(
        &mut self,
        transform: ContentTransform,
        content_offset: f64,
        needs_rewrite: bool,
    ) -> bool {
        self.content_offset = content_offset;
        self.offset_needs_rewrite = needs_rewrite;
        if self.transform == transform {
            return false;
        }
        self.transform = transform;
        self.transform_dirty = true;
        self.offset_changed_pending = true;
        self.needs_check = true;
        true
    }

    pub(crate) fn finish_rewrite(&mut self) {
        self.offset_needs_rewrite = false;
    }

    pub(crate) fn schedule_total_size(&mut self, size: f64) {
        self.pending_total_size = Some(size);
        self.needs_check = true;
    }

    pub(crate) fn schedule_scroll_offset(&mut self, offset: f64) {
        self.pending_scroll_offset = Some(offset);
        self.needs_check = true;
    }

    pub(crate) fn schedule_content_rendered(&mut self) {
        self.content_rendered_pending = true;
        self.needs_check = true;
    }

    /// Drops notifications that have been scheduled but not yet released.
    ///
    /// A pending trailing-edge rewrite is kept: it fixes up the viewport's own transform and
    /// does not belong to the cancelled attachment.
    pub(crate) fn cancel_notifications(&mut self) {
        self.content_rendered_pending = false;
        self.offset_changed_pending = self.offset_needs_rewrite;
    }

    /// The single write point of a cycle.
    pub(crate) fn flush(&mut self, geometry: &mut dyn ViewportGeometry, axis: Axis) -> Flush {
        let mut flush = Flush::default();
        if core::mem::take(&mut self.transform_dirty) {
            geometry.write_content_transform(&self.transform);
            flush.transform = Some(self.transform);
        }
        if let Some(size) = self.pending_total_size.take() {
            geometry.write_total_content_size(axis, size);
            flush.total_size = Some(size);
        }
        if let Some(offset) = self.pending_scroll_offset.take() {
            geometry.write_scroll_offset(axis, offset);
            flush.scroll_offset = Some(offset);
        }
        self.needs_check = false;
        flush
    }

    /// Releases pending notifications, unless a check pass is still outstanding.
    pub(crate) fn take_notifications(&mut self) -> Option<Notifications> {
        if self.needs_check {
            return None;
        }
        Some(Notifications {
            content_rendered: core::mem::take(&mut self.content_rendered_pending),
            offset_changed: core::mem::take(&mut self.offset_changed_pending),
        })
    }
}

/// What a check pass did.
///
/// After a check the host renders `range` (when `range_changed`, or whenever it re-renders)
/// and then calls `Viewport::settle`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckReport {
    /// The range the host should have materialized after this pass.
    pub range: ListRange,
    pub range_changed: bool,
    pub transform_written: Option<ContentTransform>,
    pub total_size_written: Option<f64>,
    pub scroll_offset_written: Option<f64>,
}

impl CheckReport {
    pub(crate) fn idle(range: ListRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    /// `true` when the pass touched neither the range nor the geometry.
    pub fn is_idle(&self) -> bool {
        !self.range_changed
            && self.transform_written.is_none()
            && self.total_size_written.is_none()
            && self.scroll_offset_written.is_none()
    }
}

/// Outcome of `Viewport::settle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Settle {
    /// Mutations are still waiting for a check pass; nothing was released.
    Pending,
    /// Settled with nothing to notify.
    Quiet,
    /// Settled and the strategy was notified.
    Notified {
        content_rendered: bool,
        offset_changed: bool,
    },
}

/// Everything one `Viewport::run_cycle` did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleReport {
    /// Whether a coalesced scroll tick was delivered to the strategy.
    pub scrolled: bool,
    pub check: CheckReport,
    pub settle: Settle,
}
