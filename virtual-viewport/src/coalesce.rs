/// Collapses raw scroll events into at most one tick per rendering frame.
///
/// Hosts call `push` for every scroll event they receive; the viewport drains once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScrollCoalescer {
    event_count: u32,
}

impl ScrollCoalescer {
    pub(crate) fn push(&mut self) {
        self.event_count = self.event_count.saturating_add(1);
    }

    pub(crate) fn has_events(&self) -> bool {
        self.event_count > 0
    }

    /// Returns how many raw events were folded into this tick, and resets.
    pub(crate) fn drain(&mut self) -> u32 {
        core::mem::take(&mut self.event_count)
    }

    pub(crate) fn clear(&mut self) {
        self.event_count = 0;
    }
}
