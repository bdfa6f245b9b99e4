//! Geometry primitives in layout points.
//!
//! All values are `f64` points. Offsets grow downward and toward the
//! trailing edge, matching the coordinate space of the host toolkit.
//!
//! # Invariants
//!
//! - `Size` components are never negative after [`Size::new`].
//! - `Orientation` is derived from a size: wider than tall is landscape,
//!   everything else (including square and empty) is portrait.

use bitflags::bitflags;

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a size, clamping negative components to zero.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Whether either dimension is zero.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Orientation implied by this size.
    #[inline]
    #[must_use]
    pub fn orientation(self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Extent along an axis.
    #[inline]
    #[must_use]
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Shrink by the given insets, never below zero.
    #[must_use]
    pub fn inset(self, insets: Insets) -> Self {
        Self::new(
            self.width - insets.leading - insets.trailing,
            self.height - insets.top - insets.bottom,
        )
    }
}

/// Edge insets (safe area, margins).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: f64,
    pub leading: f64,
    pub bottom: f64,
    pub trailing: f64,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self {
        top: 0.0,
        leading: 0.0,
        bottom: 0.0,
        trailing: 0.0,
    };

    #[must_use]
    pub const fn new(top: f64, leading: f64, bottom: f64, trailing: f64) -> Self {
        Self {
            top,
            leading,
            bottom,
            trailing,
        }
    }

    /// Same inset on every edge.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Inset on a single edge.
    #[must_use]
    pub fn edge(self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Leading => self.leading,
            Edge::Bottom => self.bottom,
            Edge::Trailing => self.trailing,
        }
    }

    /// Keep only the edges in `edges`, zeroing the rest.
    #[must_use]
    pub fn masked(self, edges: Edges) -> Self {
        let pick = |edge: Edges, value: f64| if edges.contains(edge) { value } else { 0.0 };
        Self {
            top: pick(Edges::TOP, self.top),
            leading: pick(Edges::LEADING, self.leading),
            bottom: pick(Edges::BOTTOM, self.bottom),
            trailing: pick(Edges::TRAILING, self.trailing),
        }
    }
}

bitflags! {
    /// A set of container edges.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Edges: u8 {
        const TOP = 1 << 0;
        const LEADING = 1 << 1;
        const BOTTOM = 1 << 2;
        const TRAILING = 1 << 3;
        const HORIZONTAL = Self::LEADING.bits() | Self::TRAILING.bits();
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Default for Edges {
    fn default() -> Self {
        Self::empty()
    }
}

/// A 2D translation (drag delta).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Component along an axis.
    #[inline]
    #[must_use]
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.dx,
            Axis::Vertical => self.dy,
        }
    }
}

/// Primary axis of a drag interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Device/container orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// A container edge a surface can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Edge {
    Top,
    #[default]
    Leading,
    Bottom,
    Trailing,
}

impl Edge {
    /// Axis a surface attached to this edge slides along.
    #[inline]
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Leading | Self::Trailing => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// Sign of motion that moves a surface off-screen through this edge.
    ///
    /// `-1.0` for leading/top (toward the origin), `1.0` for trailing/bottom.
    #[inline]
    #[must_use]
    pub const fn outward_sign(self) -> f64 {
        match self {
            Self::Leading | Self::Top => -1.0,
            Self::Trailing | Self::Bottom => 1.0,
        }
    }

    /// The single-edge flag for this edge.
    #[must_use]
    pub const fn as_edges(self) -> Edges {
        match self {
            Self::Top => Edges::TOP,
            Self::Leading => Edges::LEADING,
            Self::Bottom => Edges::BOTTOM,
            Self::Trailing => Edges::TRAILING,
        }
    }
}

/// Geometry a presentation layer exposes to the surfaces it hosts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerGeometry {
    pub size: Size,
    pub safe_area: Insets,
}

impl ContainerGeometry {
    #[must_use]
    pub fn new(size: Size, safe_area: Insets) -> Self {
        Self { size, safe_area }
    }

    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.size.orientation()
    }
}
