//! Windowing strategies for the `virtual-viewport` crate.
//!
//! The `virtual-viewport` core never decides which items to render; it delegates that to a
//! [`virtual_viewport::ScrollStrategy`]. This crate provides ready-made strategies:
//!
//! - [`FixedSizeStrategy`]: every item has the same size along the scroll axis
//!
//! The strategies are framework-agnostic, like the core.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fixed;

#[cfg(test)]
mod tests;

pub use error::FixedSizeError;
pub use fixed::FixedSizeStrategy;
