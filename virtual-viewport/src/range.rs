use crate::ListRange;

/// Rendered-range and total-size bookkeeping.
///
/// Keeps two ranges apart:
/// - `committed`: the last value passed to `Viewport::set_rendered_range`.
/// - `materialized`: the range the host was told to render at the last check pass. Only this
///   one is backed by real geometry, so measurements are validated against it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct RangeTracker {
    committed: ListRange,
    materialized: ListRange,
    total_content_size: f64,
}

impl RangeTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn committed(&self) -> ListRange {
        self.committed
    }

    pub(crate) fn materialized(&self) -> ListRange {
        self.materialized
    }

    pub(crate) fn total_content_size(&self) -> f64 {
        self.total_content_size
    }

    /// Returns `false` (and changes nothing) when `range` equals the committed range.
    pub(crate) fn commit(&mut self, range: ListRange) -> bool {
        if self.committed == range {
            return false;
        }
        self.committed = range;
        true
    }

    pub(crate) fn set_total_content_size(&mut self, size: f64) -> bool {
        if self.total_content_size == size {
            return false;
        }
        self.total_content_size = size;
        true
    }

    /// Promotes the committed range to materialized. Returns whether it moved.
    pub(crate) fn materialize(&mut self) -> bool {
        let changed = self.materialized != self.committed;
        self.materialized = self.committed;
        changed
    }

    pub(crate) fn is_materialized(&self, range: ListRange) -> bool {
        self.materialized.contains_range(range)
    }
}
