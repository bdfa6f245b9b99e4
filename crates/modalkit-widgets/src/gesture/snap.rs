#![forbid(unsafe_code)]

//! Detent and snap resolution.
//!
//! Pure functions from a [`DragRelease`] to a [`SnapAction`]. Offsets use the
//! bottom-sheet convention: an offset is the distance from the container's
//! top edge to the sheet's top edge, so *larger* offsets are *less*
//! expanded and "down" (positive velocity) heads toward dismissal.
//!
//! ```text
//! offset 0 ─────────────── container top
//!          max_offset  ┐
//!                      │ IdealToMax   [max_offset, ideal_offset]
//!          ideal_offset┤
//!                      │ MinToIdeal   (ideal_offset, min_offset]
//!          min_offset  ┤
//!                      │ PullPastMin  (min_offset, ..)
//! offset H ─────────────── container bottom
//! ```
//!
//! # Conventions
//!
//! - Dismiss-distance comparisons are inclusive: travelling exactly the
//!   threshold dismisses.
//! - An offset exactly between two detents snaps to the less expanded one,
//!   which is also the first one compared.
//!
//! # Failure Modes
//!
//! - `Detents::new` panics when `min <= ideal <= max` does not hold;
//!   `Detents::try_new` returns [`ConfigError::InvalidDetents`].
//! - Classifying an offset above the max detent panics: the drag engine
//!   clamps there, so reaching it is a logic error.

use modalkit_core::ConfigError;

use super::drag::DragRelease;

/// Slack for float comparisons against detent offsets.
const EPSILON: f64 = 1e-6;

/// Unit detent values are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DetentUnit {
    Points,
    /// Fraction of the container height.
    #[default]
    Fraction,
}

/// One of the three detents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detent {
    Min,
    Ideal,
    Max,
}

/// Ordered heights a resizable surface can rest at.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detents {
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: DetentUnit,
    pub min: f64,
    pub ideal: f64,
    pub max: f64,
}

impl Detents {
    /// Create detents.
    ///
    /// # Panics
    ///
    /// If `min <= ideal <= max` does not hold.
    #[must_use]
    pub fn new(unit: DetentUnit, min: f64, ideal: f64, max: f64) -> Self {
        assert!(
            min <= ideal && ideal <= max,
            "detents must satisfy min <= ideal <= max (got min={min}, ideal={ideal}, max={max})"
        );
        Self {
            unit,
            min,
            ideal,
            max,
        }
    }

    /// Create detents, reporting an ordering violation as an error.
    pub fn try_new(unit: DetentUnit, min: f64, ideal: f64, max: f64) -> Result<Self, ConfigError> {
        let detents = Self {
            unit,
            min,
            ideal,
            max,
        };
        detents.validate()?;
        Ok(detents)
    }

    /// Heights in points.
    #[must_use]
    pub fn points(min: f64, ideal: f64, max: f64) -> Self {
        Self::new(DetentUnit::Points, min, ideal, max)
    }

    /// Heights as fractions of the container.
    #[must_use]
    pub fn fraction(min: f64, ideal: f64, max: f64) -> Self {
        Self::new(DetentUnit::Fraction, min, ideal, max)
    }

    /// A single non-resizable height.
    #[must_use]
    pub fn fixed(unit: DetentUnit, value: f64) -> Self {
        Self::new(unit, value, value, value)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.min <= self.ideal && self.ideal <= self.max;
        if !ordered {
            return Err(ConfigError::InvalidDetents {
                min: self.min,
                ideal: self.ideal,
                max: self.max,
            });
        }
        match self.unit {
            DetentUnit::Fraction => {
                modalkit_core::error::check_fraction("detents.min", self.min)?;
                modalkit_core::error::check_fraction("detents.max", self.max)?;
            }
            DetentUnit::Points => {
                modalkit_core::error::check_dimension("detents.min", self.min)?;
            }
        }
        Ok(())
    }

    /// Whether the surface can rest at more than one height.
    #[must_use]
    pub fn is_resizable(&self) -> bool {
        self.min != self.ideal || self.ideal != self.max
    }

    /// Resolve against a container height.
    #[must_use]
    pub fn resolve(&self, container_height: f64) -> ResolvedDetents {
        let container_height = container_height.max(0.0);
        let to_points = |value: f64| {
            let points = match self.unit {
                DetentUnit::Points => value,
                DetentUnit::Fraction => value * container_height,
            };
            points.clamp(0.0, container_height)
        };
        ResolvedDetents {
            container_height,
            min: to_points(self.min),
            ideal: to_points(self.ideal),
            max: to_points(self.max),
        }
    }
}

/// Detent heights in points for one container height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedDetents {
    pub container_height: f64,
    pub min: f64,
    pub ideal: f64,
    pub max: f64,
}

impl ResolvedDetents {
    #[must_use]
    pub fn height(&self, detent: Detent) -> f64 {
        match detent {
            Detent::Min => self.min,
            Detent::Ideal => self.ideal,
            Detent::Max => self.max,
        }
    }

    /// Offset of a detent: `container_height - height`.
    #[must_use]
    pub fn offset(&self, detent: Detent) -> f64 {
        self.container_height - self.height(detent)
    }

    #[must_use]
    pub fn min_offset(&self) -> f64 {
        self.offset(Detent::Min)
    }

    #[must_use]
    pub fn ideal_offset(&self) -> f64 {
        self.offset(Detent::Ideal)
    }

    #[must_use]
    pub fn max_offset(&self) -> f64 {
        self.offset(Detent::Max)
    }

    /// The detent resting at `offset`, preferring the less expanded.
    #[must_use]
    pub fn detent_at(&self, offset: f64) -> Option<Detent> {
        [Detent::Min, Detent::Ideal, Detent::Max]
            .into_iter()
            .find(|&d| (self.offset(d) - offset).abs() <= EPSILON)
    }

    /// Region containing `offset`.
    ///
    /// # Panics
    ///
    /// If `offset` lies above the max detent.
    #[must_use]
    pub fn region(&self, offset: f64) -> Region {
        assert!(
            offset >= self.max_offset() - EPSILON,
            "offset {offset} above max detent offset {}",
            self.max_offset()
        );
        if offset <= self.ideal_offset() {
            Region::IdealToMax
        } else if offset <= self.min_offset() {
            Region::MinToIdeal
        } else {
            Region::PullPastMin
        }
    }
}

/// Where a released offset lies relative to the detents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    IdealToMax,
    MinToIdeal,
    PullPastMin,
}

impl Region {
    /// Detents bounding the region, less expanded first.
    const fn bounds(self) -> (Detent, Option<Detent>) {
        match self {
            Self::IdealToMax => (Detent::Ideal, Some(Detent::Max)),
            Self::MinToIdeal => (Detent::Min, Some(Detent::Ideal)),
            Self::PullPastMin => (Detent::Min, None),
        }
    }
}

/// Resolver output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapAction {
    SnapTo(f64),
    Dismiss,
}

/// Thresholds for one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPolicy {
    /// Speed (points per second) at or above which the high-velocity rule
    /// applies.
    pub velocity_threshold: f64,
    /// Distance past the dismiss boundary that dismisses; `None` disables
    /// dismissal by drag.
    pub dismiss_distance: Option<f64>,
}

impl SnapPolicy {
    #[must_use]
    pub const fn new(velocity_threshold: f64, dismiss_distance: Option<f64>) -> Self {
        Self {
            velocity_threshold,
            dismiss_distance,
        }
    }

    fn fast_velocity(&self, release: &DragRelease) -> Option<f64> {
        release
            .velocity
            .filter(|v| v.abs() >= self.velocity_threshold)
    }
}

/// Resolve a release on a detent-based surface.
#[must_use]
pub fn resolve_resizable(release: &DragRelease, detents: &ResolvedDetents, policy: &SnapPolicy) -> SnapAction {
    let region = detents.region(release.offset);

    if let Some(velocity) = policy.fast_velocity(release) {
        let down = velocity > 0.0;
        let target = match (region, down) {
            (Region::IdealToMax, false) => Detent::Max,
            (Region::IdealToMax, true) | (Region::MinToIdeal, false) => Detent::Ideal,
            (Region::MinToIdeal, true) | (Region::PullPastMin, false) => Detent::Min,
            (Region::PullPastMin, true) => {
                if policy.dismiss_distance.is_some() {
                    return SnapAction::Dismiss;
                }
                Detent::Min
            }
        };
        return SnapAction::SnapTo(detents.offset(target));
    }

    let pulled_past = policy
        .dismiss_distance
        .is_some_and(|distance| release.offset - detents.min_offset() >= distance);
    if pulled_past && release.translation > 0.0 {
        return SnapAction::Dismiss;
    }

    let (first, second) = region.bounds();
    let first_offset = detents.offset(first);
    let target = match second.map(|d| detents.offset(d)) {
        Some(second_offset)
            if (release.offset - second_offset).abs() < (release.offset - first_offset).abs() =>
        {
            second_offset
        }
        _ => first_offset,
    };
    SnapAction::SnapTo(target)
}

/// Resolve a release on an edge-attached surface.
///
/// `release.offset` is the outward distance from the shown position; the
/// only snap target is the shown position, 0.
#[must_use]
pub fn resolve_edge(release: &DragRelease, policy: &SnapPolicy) -> SnapAction {
    let Some(distance) = policy.dismiss_distance else {
        return SnapAction::SnapTo(0.0);
    };
    let dismiss = match policy.fast_velocity(release) {
        Some(velocity) => velocity > 0.0,
        None => release.offset >= distance,
    };
    if dismiss {
        SnapAction::Dismiss
    } else {
        SnapAction::SnapTo(0.0)
    }
}
