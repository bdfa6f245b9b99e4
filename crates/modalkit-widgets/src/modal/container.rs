#![forbid(unsafe_code)]

//! Surface sizing against the container.
//!
//! Sizes are declared per orientation and resolved against the current
//! container whenever it changes. A dimension is either absolute points or
//! a fraction of the container's extent along the same axis.

use modalkit_core::error::{check_dimension, check_fraction};
use modalkit_core::{Axis, ConfigError, Orientation, Size};

/// A length in points or as a fraction of the container.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Dimension {
    Points(f64),
    Fraction(f64),
}

impl Dimension {
    /// Resolve against a container extent.
    #[must_use]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Points(points) => points,
            Self::Fraction(fraction) => fraction * extent,
        }
    }

    /// Check the value is usable.
    pub fn validate(self, field: &'static str) -> Result<(), ConfigError> {
        match self {
            Self::Points(points) => check_dimension(field, points).map(drop),
            Self::Fraction(fraction) => check_fraction(field, fraction).map(drop),
        }
    }
}

/// How a surface sizes itself along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SizeSpec {
    /// A fixed length, capped at the container extent.
    Fixed(Dimension),
    /// Fill the container minus a margin on both sides.
    Stretched { margin: Dimension },
}

impl SizeSpec {
    #[must_use]
    pub const fn points(value: f64) -> Self {
        Self::Fixed(Dimension::Points(value))
    }

    #[must_use]
    pub const fn fraction(value: f64) -> Self {
        Self::Fixed(Dimension::Fraction(value))
    }

    #[must_use]
    pub const fn stretched(margin: f64) -> Self {
        Self::Stretched {
            margin: Dimension::Points(margin),
        }
    }

    /// Resolve against a container extent; never exceeds it, never negative.
    #[must_use]
    pub fn resolve(self, extent: f64) -> f64 {
        let extent = extent.max(0.0);
        match self {
            Self::Fixed(dimension) => dimension.resolve(extent).clamp(0.0, extent),
            Self::Stretched { margin } => (extent - 2.0 * margin.resolve(extent)).max(0.0),
        }
    }

    pub fn validate(self, field: &'static str) -> Result<(), ConfigError> {
        match self {
            Self::Fixed(dimension) | Self::Stretched { margin: dimension } => {
                dimension.validate(field)
            }
        }
    }
}

/// A value chosen by container orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orientational<T> {
    pub portrait: T,
    pub landscape: T,
}

impl<T> Orientational<T> {
    #[must_use]
    pub const fn new(portrait: T, landscape: T) -> Self {
        Self {
            portrait,
            landscape,
        }
    }

    /// The value for `orientation`.
    #[must_use]
    pub fn current(&self, orientation: Orientation) -> &T {
        match orientation {
            Orientation::Portrait => &self.portrait,
            Orientation::Landscape => &self.landscape,
        }
    }
}

impl<T: Clone> Orientational<T> {
    /// The same value in both orientations.
    #[must_use]
    pub fn uniform(value: T) -> Self {
        Self {
            portrait: value.clone(),
            landscape: value,
        }
    }
}

/// Width and height specs for a centered surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceSize {
    pub width: SizeSpec,
    pub height: SizeSpec,
}

impl SurfaceSize {
    #[must_use]
    pub const fn new(width: SizeSpec, height: SizeSpec) -> Self {
        Self { width, height }
    }

    /// Resolve both axes against `available`.
    #[must_use]
    pub fn resolve(self, available: Size) -> Size {
        Size::new(
            self.width.resolve(available.along(Axis::Horizontal)),
            self.height.resolve(available.along(Axis::Vertical)),
        )
    }

    pub fn validate(self) -> Result<(), ConfigError> {
        self.width.validate("width")?;
        self.height.validate("height")
    }
}
