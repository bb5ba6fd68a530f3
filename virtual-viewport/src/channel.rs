use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// A single-threaded broadcast stream.
///
/// Every [`Subscription`] gets its own queue: `emit` clones the value into each open queue and
/// subscribers pull at their own pace. Dropping a subscription unsubscribes it. `complete`
/// closes the stream for good; values already queued stay readable.
///
/// Cloning a `Channel` yields another handle to the same stream.
pub struct Channel<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

struct Shared<T> {
    inboxes: Vec<Rc<RefCell<Inbox<T>>>>,
    completed: bool,
}

struct Inbox<T> {
    queue: VecDeque<T>,
    closed: bool,
}

impl<T> Inbox<T> {
    fn new(closed: bool) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            queue: VecDeque::new(),
            closed,
        }))
    }
}

impl<T> Channel<T> {
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                inboxes: Vec::new(),
                completed: false,
            })),
        }
    }

    pub fn subscribe(&self) -> Subscription<T> {
        self.subscribe_seeded(None)
    }

    /// Subscribes with `seed` already queued (used for replaying a current value).
    pub(crate) fn subscribe_seeded(&self, seed: Option<T>) -> Subscription<T> {
        let mut shared = self.shared.borrow_mut();
        let inbox = Inbox::new(shared.completed);
        if let Some(value) = seed {
            inbox.borrow_mut().queue.push_back(value);
        }
        if !shared.completed {
            shared.inboxes.push(Rc::clone(&inbox));
        }
        Subscription {
            inbox,
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Closes the stream. Later `emit` calls are ignored and new subscriptions start closed.
    pub fn complete(&self) {
        let mut shared = self.shared.borrow_mut();
        if shared.completed {
            return;
        }
        shared.completed = true;
        for inbox in shared.inboxes.drain(..) {
            inbox.borrow_mut().closed = true;
        }
    }

    pub fn is_completed(&self) -> bool {
        self.shared.borrow().completed
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.borrow().inboxes.len()
    }
}

impl<T: Clone> Channel<T> {
    pub fn emit(&self, value: T) {
        let shared = self.shared.borrow();
        if shared.completed {
            return;
        }
        for inbox in &shared.inboxes {
            inbox.borrow_mut().queue.push_back(value.clone());
        }
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("Channel")
            .field("subscribers", &shared.inboxes.len())
            .field("completed", &shared.completed)
            .finish()
    }
}

/// A pull-based handle onto a [`Channel`].
pub struct Subscription<T> {
    inbox: Rc<RefCell<Inbox<T>>>,
    shared: Weak<RefCell<Shared<T>>>,
}

impl<T> Subscription<T> {
    pub fn try_recv(&self) -> Option<T> {
        self.inbox.borrow_mut().queue.pop_front()
    }

    /// Takes every queued value, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.inbox.borrow_mut().queue.drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.inbox.borrow().queue.len()
    }

    /// Whether the source stream has completed. Queued values may still be readable.
    pub fn is_closed(&self) -> bool {
        self.inbox.borrow().closed
    }

    /// Closed and fully drained: nothing will ever be received again.
    pub fn is_terminated(&self) -> bool {
        let inbox = self.inbox.borrow();
        inbox.closed && inbox.queue.is_empty()
    }

    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        shared
            .borrow_mut()
            .inboxes
            .retain(|inbox| !Rc::ptr_eq(inbox, &self.inbox));
    }
}

impl<T> Iterator for Subscription<T> {
    type Item = T;

    /// Non-blocking: yields queued values and stops when the queue is empty.
    fn next(&mut self) -> Option<T> {
        self.try_recv()
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inbox = self.inbox.borrow();
        f.debug_struct("Subscription")
            .field("pending", &inbox.queue.len())
            .field("closed", &inbox.closed)
            .finish()
    }
}
