use core::fmt;

use crate::{Axis, ViewportError};

/// Which edge of the rendered content the offset is measured to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentEdge {
    /// The offset positions the leading edge of the rendered content.
    #[default]
    ToStart,
    /// The offset positions the trailing edge, so growth appears to come from the end.
    ToEnd,
}

/// Magnitude of one translation component.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TranslateLength {
    Px(f64),
    /// Relative to the translated element's own size along the axis.
    Percent(f64),
}

/// A single translation along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Translate {
    pub axis: Axis,
    pub length: TranslateLength,
}

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length {
            TranslateLength::Px(px) => write!(f, "translate{}({}px)", self.axis.name(), px),
            TranslateLength::Percent(pct) => {
                write!(f, "translate{}({}%)", self.axis.name(), pct)
            }
        }
    }
}

/// The translation applied to the rendered content container.
///
/// Always built from validated parts; the textual form (`Display`) is derived from them and is
/// never assembled from caller-provided strings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentTransform {
    axis: Axis,
    offset: f64,
    edge: ContentEdge,
}

impl ContentTransform {
    pub fn new(axis: Axis, offset: f64, edge: ContentEdge) -> Result<Self, ViewportError> {
        if !offset.is_finite() {
            return Err(ViewportError::InvalidOffset(offset));
        }
        Ok(Self {
            axis,
            // Fold -0.0 into 0.0 so equal transforms compare and print equally.
            offset: offset + 0.0,
            edge,
        })
    }

    pub fn identity(axis: Axis) -> Self {
        Self {
            axis,
            offset: 0.0,
            edge: ContentEdge::ToStart,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The signed pixel translation of the leading component.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn edge(&self) -> ContentEdge {
        self.edge
    }

    /// The translation components in application order.
    ///
    /// `ToEnd` transforms carry a second component shifting the content back by its own size.
    pub fn components(&self) -> impl Iterator<Item = Translate> + use<> {
        let axis = self.axis;
        let lead = Translate {
            axis,
            length: TranslateLength::Px(self.offset),
        };
        let trail = match self.edge {
            ContentEdge::ToStart => None,
            ContentEdge::ToEnd => Some(Translate {
                axis,
                length: TranslateLength::Percent(-100.0),
            }),
        };
        core::iter::once(lead).chain(trail)
    }
}

impl fmt::Display for ContentTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}
