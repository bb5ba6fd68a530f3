use crate::{LayoutDirection, Orientation};

/// Configuration for [`crate::Viewport`].
///
/// All fields are fixed for the viewport's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportOptions {
    pub orientation: Orientation,

    /// When set, rendered ranges only ever grow: every committed range starts at index 0 and
    /// its end never moves backwards. The content offset is pinned to 0 accordingly.
    pub append_only: bool,

    /// Inline direction of the host. Horizontal viewports translate content leftwards in RTL.
    pub direction: LayoutDirection,
}

impl ViewportOptions {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn with_append_only(mut self, append_only: bool) -> Self {
        self.append_only = append_only;
        self
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sign applied to physical translations along the scroll axis.
    pub(crate) fn axis_sign(&self) -> f64 {
        match (self.orientation, self.direction) {
            (Orientation::Horizontal, LayoutDirection::Rtl) => -1.0,
            _ => 1.0,
        }
    }
}
