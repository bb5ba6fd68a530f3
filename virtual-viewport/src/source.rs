use core::cell::Cell;

use crate::{Channel, ListRange, Orientation, Subscription};

/// A bound list of items, as seen by the viewport.
///
/// The host's renderer usually implements this: it knows the item count and can measure the
/// items it has materialized.
pub trait DataSource {
    /// A fresh subscription to item-count updates. The viewport holds it for the lifetime of
    /// one attachment and drops it on detach.
    ///
    /// Re-emitting an unchanged count is allowed; the viewport ignores it.
    fn length_changes(&self) -> Subscription<usize>;

    /// Combined physical extent of `range` along `orientation`.
    ///
    /// Only called for ranges inside the materialized range.
    fn measure_range_size(&self, range: ListRange, orientation: Orientation) -> f64;
}

/// A length stream that replays the latest count to new subscribers.
///
/// Hosts can back [`DataSource::length_changes`] with this so a freshly attached viewport picks
/// up the current count immediately.
#[derive(Debug, Default)]
pub struct LengthChannel {
    channel: Channel<usize>,
    current: Cell<Option<usize>>,
}

impl LengthChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length(len: usize) -> Self {
        Self {
            channel: Channel::new(),
            current: Cell::new(Some(len)),
        }
    }

    pub fn publish(&self, len: usize) {
        self.current.set(Some(len));
        self.channel.emit(len);
    }

    pub fn current(&self) -> Option<usize> {
        self.current.get()
    }

    pub fn subscribe(&self) -> Subscription<usize> {
        self.channel.subscribe_seeded(self.current.get())
    }

    pub fn subscriber_count(&self) -> usize {
        self.channel.subscriber_count()
    }

    pub fn complete(&self) {
        self.channel.complete();
    }
}
