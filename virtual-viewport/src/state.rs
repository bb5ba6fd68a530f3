use crate::{ContentTransform, ListRange, Orientation};

/// A lightweight snapshot of a viewport's logical state.
///
/// Useful for debugging overlays and for asserting on state in host tests without reaching
/// into the geometry. With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSnapshot {
    pub orientation: Orientation,
    pub viewport_size: f64,
    pub total_content_size: f64,
    pub data_length: usize,
    pub rendered_range: ListRange,
    pub materialized_range: ListRange,
    pub content_transform: ContentTransform,
    pub pending_scroll_offset: Option<f64>,
    pub attached: bool,
    pub destroyed: bool,
}
