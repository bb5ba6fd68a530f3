/// Invalid [`crate::FixedSizeStrategy`] configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixedSizeError {
    #[error("item size must be a positive finite number, got {0}")]
    InvalidItemSize(f64),

    #[error("buffer sizes must be non-negative finite numbers, got {0}")]
    InvalidBuffer(f64),

    #[error("max buffer ({max}px) must be greater than or equal to min buffer ({min}px)")]
    BufferOrder { min: f64, max: f64 },
}
