use crate::ListRange;

/// Errors surfaced by [`crate::Viewport`] operations.
///
/// None of these are retryable: every viewport operation is a local, synchronous state
/// transition, so an error always points at a caller-side contract violation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewportError {
    /// A data source is already bound; call `detach()` first.
    #[error("a data source is already attached to this viewport")]
    AlreadyAttached,

    /// A measurement was requested over indexes that are not currently materialized.
    #[error("range {requested:?} is outside the rendered range {rendered:?}")]
    RangeNotRendered {
        requested: ListRange,
        rendered: ListRange,
    },

    #[error("content offset must be a finite number, got {0}")]
    InvalidOffset(f64),

    #[error("range start {start} is past its end {end}")]
    InvalidRange { start: usize, end: usize },

    #[error("the viewport has been destroyed")]
    Destroyed,
}
