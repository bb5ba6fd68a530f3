//! A headless virtual-scroll viewport core.
//!
//! For ready-made windowing policies (fixed-size items), see the `virtual-viewport-strategies`
//! crate.
//!
//! The [`Viewport`] renders only a window of a large, possibly unbounded list. It reconciles
//! three independently changing quantities (the data length, the physical viewport size and the
//! user's scroll position) into a committed `start..end` range and a content translation, and it
//! batches its physical writes so a burst of updates costs one layout pass.
//!
//! It is UI-agnostic. The host is expected to provide:
//! - a [`ViewportGeometry`]: reads and writes of the scroll container's physical state
//! - a [`DataSource`]: the item count stream and measurement of rendered items
//! - a [`ScrollStrategy`]: the policy mapping scroll position to a rendered range
//!
//! and to drive the cycle (`frame` → `check` → render → `settle`) once per rendering frame.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod channel;
mod coalesce;
mod error;
mod geometry;
mod options;
mod range;
mod scheduler;
mod source;
mod state;
mod strategy;
mod transform;
mod types;
mod viewport;


pub use channel::{Channel, Subscription};
pub use error::ViewportError;
pub use geometry::ViewportGeometry;
pub use options::ViewportOptions;
pub use scheduler::{CheckReport, CycleReport, Settle};
pub use source::{DataSource, LengthChannel};
pub use state::ViewportSnapshot;
pub use strategy::ScrollStrategy;
pub use transform::{ContentEdge, ContentTransform, Translate, TranslateLength};
pub use types::{Axis, LayoutDirection, ListRange, Orientation};
pub use viewport::Viewport;
