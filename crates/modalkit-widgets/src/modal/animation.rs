#![forbid(unsafe_code)]

//! Time-based interpolation for presentation transitions and offsets.
//!
//! The lifecycle state machine never touches visual properties directly. It
//! drives a scalar `progress` in `[0, 1]` through a [`Transition`]; the
//! renderer maps that value to scale, opacity, blur, or slide offsets.
//! Gesture-driven offsets use [`AnimatedValue`], which separates the
//! logical target (used for snapping decisions) from the interpolated value
//! (used for drawing).
//!
//! # Invariants
//!
//! - `Transition::value_at` returns exactly `from` at the start instant and
//!   exactly `to` at or after the finish instant.
//! - A zero-duration transition is finished immediately.
//! - `AnimatedValue::target` is never an interpolated value.

use modalkit_core::{Duration, Instant};

/// Timing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear time `t` in `[0, 1]` onto the curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// A curve plus a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicAnimation {
    pub easing: Easing,
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub duration: Duration,
}

impl BasicAnimation {
    #[must_use]
    pub const fn new(easing: Easing, duration: Duration) -> Self {
        Self { easing, duration }
    }

    #[must_use]
    pub const fn linear(duration: Duration) -> Self {
        Self::new(Easing::Linear, duration)
    }

    #[must_use]
    pub const fn ease_out(duration: Duration) -> Self {
        Self::new(Easing::EaseOut, duration)
    }

    #[must_use]
    pub const fn ease_in_out(duration: Duration) -> Self {
        Self::new(Easing::EaseInOut, duration)
    }

    /// Short linear animation applied to offsets while a finger is down.
    ///
    /// Smooths out rapid gesture callbacks without the lag of a full curve.
    #[must_use]
    pub const fn drag_follow() -> Self {
        Self::linear(Duration::from_millis(100))
    }

    /// No animation: values jump.
    #[must_use]
    pub const fn instant() -> Self {
        Self::linear(Duration::ZERO)
    }
}

impl Default for BasicAnimation {
    fn default() -> Self {
        Self::ease_in_out(Duration::from_millis(300))
    }
}

/// An interpolation from one scalar to another over an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: f64,
    to: f64,
    start: Instant,
    animation: BasicAnimation,
}

impl Transition {
    #[must_use]
    pub fn new(from: f64, to: f64, start: Instant, animation: BasicAnimation) -> Self {
        Self {
            from,
            to,
            start,
            animation,
        }
    }

    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Instant at which the transition completes.
    #[must_use]
    pub fn finishes_at(&self) -> Instant {
        self.start + self.animation.duration
    }

    /// Linear time fraction elapsed at `now`, in `[0, 1]`.
    #[must_use]
    pub fn time_fraction(&self, now: Instant) -> f64 {
        let total = self.animation.duration.as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f64();
        (elapsed / total).clamp(0.0, 1.0)
    }

    /// Interpolated value at `now`.
    #[must_use]
    pub fn value_at(&self, now: Instant) -> f64 {
        let t = self.time_fraction(now);
        if t >= 1.0 {
            return self.to;
        }
        let eased = self.animation.easing.apply(t);
        self.from + (self.to - self.from) * eased
    }

    /// Whether the transition has completed by `now`.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.finishes_at()
    }
}

/// A scalar with a logical target and an optional in-flight transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValue {
    target: f64,
    transition: Option<Transition>,
}

impl AnimatedValue {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            target: value,
            transition: None,
        }
    }

    /// The value the animation is heading to.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Animate from the currently displayed value to `target`.
    pub fn set(&mut self, target: f64, animation: BasicAnimation, now: Instant) {
        let from = self.value_at(now);
        self.target = target;
        self.transition = if animation.duration.is_zero() || from == target {
            None
        } else {
            Some(Transition::new(from, target, now, animation))
        };
    }

    /// Move to `value` without animating.
    pub fn jump(&mut self, value: f64) {
        self.target = value;
        self.transition = None;
    }

    /// Displayed value at `now`.
    #[must_use]
    pub fn value_at(&self, now: Instant) -> f64 {
        match &self.transition {
            Some(transition) => transition.value_at(now),
            None => self.target,
        }
    }

    /// Whether an interpolation is still running at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition.is_some_and(|t| !t.is_finished(now))
    }
}

/// Durations as integer milliseconds in configuration files.
#[cfg(feature = "serde")]
pub(crate) mod duration_ms {
    use modalkit_core::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
