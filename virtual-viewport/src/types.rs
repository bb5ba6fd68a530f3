use core::cmp;

use crate::ViewportError;

/// The scroll axis of a viewport. Fixed for the viewport's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    pub fn axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::X,
            Self::Vertical => Axis::Y,
        }
    }
}

/// A physical axis of the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
        }
    }
}

/// Inline layout direction of the host. Only affects horizontal viewports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// A half-open interval of item indexes (`start..end`).
///
/// `start <= end` always holds; use [`ListRange::try_new`] to reject inverted input or
/// [`ListRange::new`] to clamp it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawListRange"))]
pub struct ListRange {
    start: usize,
    end: usize, // exclusive
}

impl ListRange {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Creates a range, clamping `end` up to `start` when the input is inverted.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: cmp::max(start, end),
        }
    }

    pub fn try_new(start: usize, end: usize) -> Result<Self, ViewportError> {
        if start > end {
            return Err(ViewportError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether every index of `other` lies inside `self`. Empty ranges are contained everywhere.
    pub fn contains_range(&self, other: ListRange) -> bool {
        other.is_empty() || (other.start >= self.start && other.end <= self.end)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn as_range(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<ListRange> for core::ops::Range<usize> {
    fn from(range: ListRange) -> Self {
        range.as_range()
    }
}

// Unvalidated wire form; deserialization goes through `ListRange::try_new`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawListRange {
    start: usize,
    end: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawListRange> for ListRange {
    type Error = ViewportError;

    fn try_from(raw: RawListRange) -> Result<Self, Self::Error> {
        Self::try_new(raw.start, raw.end)
    }
}
