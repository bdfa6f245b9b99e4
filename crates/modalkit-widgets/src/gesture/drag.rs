#![forbid(unsafe_code)]

//! Drag-interaction engine.
//!
//! Converts a stream of cumulative-translation samples into a clamped
//! offset while the finger is down, and into a [`DragRelease`] (final
//! offset, translation, velocity) when it lifts.
//!
//! Offsets live in a normalized space chosen by the surface: the engine
//! multiplies raw translation by a sign so that positive always means
//! "toward dismissal" (down for a bottom sheet, off-screen for an edge
//! panel).
//!
//! # Invariants
//!
//! 1. The pre-drag offset is captured on the first `changed` of a gesture
//!    and cleared on `ended`/`cancel`, whatever the outcome.
//! 2. The offset never passes `lower`, and passes `upper` only up to the
//!    dismiss limit when dismissal by drag is enabled.
//! 3. Velocity uses the last two samples with distinct timestamps; with
//!    fewer it is `None`.
//!
//! # Failure Modes
//!
//! - `ended` without a preceding `changed` returns `None`.
//! - A repeated timestamp replaces the previous sample instead of producing
//!   an infinite velocity.

use modalkit_core::{Axis, DragSample, Instant};

/// Allowed offset range for one drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetBounds {
    pub lower: f64,
    pub upper: f64,
    /// How far past `upper` the drag may go when dismiss-by-drag is on.
    pub dismiss_limit: Option<f64>,
}

impl OffsetBounds {
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            dismiss_limit: None,
        }
    }

    /// Allow overshooting `upper` up to `limit`.
    #[must_use]
    pub const fn with_dismiss_limit(mut self, limit: f64) -> Self {
        self.dismiss_limit = Some(limit);
        self
    }

    /// Clamp a proposed offset.
    #[must_use]
    pub fn clamp(&self, proposed: f64) -> f64 {
        let ceiling = match self.dismiss_limit {
            Some(limit) => limit.max(self.upper),
            None => self.upper,
        };
        proposed.max(self.lower).min(ceiling)
    }
}

/// Outcome of a finished drag, fed to the snap resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Clamped offset at release.
    pub offset: f64,
    /// Total signed translation along the drag axis.
    pub translation: f64,
    /// Points per second along the drag axis, if measurable.
    pub velocity: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    value: f64,
    timestamp: Instant,
}

/// Per-gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSession {
    offset_before_drag: Option<f64>,
    previous: Option<Sample>,
    current: Option<Sample>,
}

impl DragSession {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.offset_before_drag.is_some()
    }

    #[must_use]
    pub fn offset_before_drag(&self) -> Option<f64> {
        self.offset_before_drag
    }

    fn push(&mut self, sample: Sample) {
        match self.current {
            Some(current) if current.timestamp >= sample.timestamp => {
                self.current = Some(sample);
            }
            _ => {
                self.previous = self.current;
                self.current = Some(sample);
            }
        }
    }

    fn velocity(&self) -> Option<f64> {
        let (previous, current) = (self.previous?, self.current?);
        let dt = current
            .timestamp
            .saturating_duration_since(previous.timestamp)
            .as_secs_f64();
        (dt > 0.0).then(|| (current.value - previous.value) / dt)
    }
}

/// Tracks one drag at a time along a fixed axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEngine {
    axis: Axis,
    sign: f64,
    session: DragSession,
}

impl DragEngine {
    /// Engine where positive raw translation is positive offset.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self::with_sign(axis, 1.0)
    }

    /// Engine whose offsets are `sign * translation`.
    #[must_use]
    pub fn with_sign(axis: Axis, sign: f64) -> Self {
        Self {
            axis,
            sign: if sign < 0.0 { -1.0 } else { 1.0 },
            session: DragSession::default(),
        }
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    #[must_use]
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    fn normalize(&self, sample: &DragSample) -> Sample {
        Sample {
            value: self.sign * sample.translation.along(self.axis),
            timestamp: sample.timestamp,
        }
    }

    /// Apply a drag-changed sample; returns the new clamped offset.
    ///
    /// `current_offset` is the surface's logical offset, captured as the
    /// drag origin on the first call of a gesture.
    pub fn changed(&mut self, sample: &DragSample, current_offset: f64, bounds: &OffsetBounds) -> f64 {
        let normalized = self.normalize(sample);
        let base = *self.session.offset_before_drag.get_or_insert(current_offset);
        self.session.push(normalized);
        bounds.clamp(base + normalized.value)
    }

    /// Finish the gesture.
    ///
    /// The session is cleared whether or not a release is produced.
    pub fn ended(&mut self, sample: &DragSample, bounds: &OffsetBounds) -> Option<DragRelease> {
        let normalized = self.normalize(sample);
        let mut session = std::mem::take(&mut self.session);
        let Some(base) = session.offset_before_drag else {
            tracing::trace!("drag ended without a session");
            return None;
        };
        session.push(normalized);
        Some(DragRelease {
            offset: bounds.clamp(base + normalized.value),
            translation: normalized.value,
            velocity: session.velocity(),
        })
    }

    /// Abandon the gesture; returns the pre-drag offset if one was active.
    pub fn cancel(&mut self) -> Option<f64> {
        std::mem::take(&mut self.session).offset_before_drag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modalkit_core::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn bounds_clamp_without_dismiss() {
        let bounds = OffsetBounds::new(100.0, 400.0);
        assert_eq!(bounds.clamp(50.0), 100.0);
        assert_eq!(bounds.clamp(250.0), 250.0);
        assert_eq!(bounds.clamp(900.0), 400.0);
    }

    #[test]
    fn bounds_overshoot_when_dismissable() {
        let bounds = OffsetBounds::new(100.0, 400.0).with_dismiss_limit(800.0);
        assert_eq!(bounds.clamp(600.0), 600.0);
        assert_eq!(bounds.clamp(900.0), 800.0);
        assert_eq!(bounds.clamp(0.0), 100.0);
    }

    #[test]
    fn changed_offsets_from_captured_origin() {
        let t0 = Instant::now();
        let bounds = OffsetBounds::new(0.0, 1000.0);
        let mut engine = DragEngine::new(Axis::Vertical);
        assert!(!engine.is_dragging());
        assert_eq!(engine.changed(&DragSample::vertical(10.0, t0), 300.0, &bounds), 310.0);
        assert!(engine.is_dragging());
        // The origin stays the first captured offset.
        assert_eq!(engine.changed(&DragSample::vertical(40.0, t0 + ms(16)), 310.0, &bounds), 340.0);
        assert_eq!(engine.session().offset_before_drag(), Some(300.0));
    }

    #[test]
    fn ended_reports_velocity_and_clears_session() {
        let t0 = Instant::now();
        let bounds = OffsetBounds::new(0.0, 1000.0);
        let mut engine = DragEngine::new(Axis::Vertical);
        engine.changed(&DragSample::vertical(10.0, t0), 200.0, &bounds);
        let release = engine
            .ended(&DragSample::vertical(20.0, t0 + ms(10)), &bounds)
            .expect("release");
        assert_eq!(release.offset, 220.0);
        assert_eq!(release.translation, 20.0);
        let velocity = release.velocity.expect("velocity");
        assert!((velocity - 1000.0).abs() < 1e-6);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn ended_without_session_is_none() {
        let t0 = Instant::now();
        let mut engine = DragEngine::new(Axis::Horizontal);
        let bounds = OffsetBounds::new(0.0, 0.0);
        assert!(engine.ended(&DragSample::horizontal(5.0, t0), &bounds).is_none());
    }

    #[test]
    fn single_sample_has_no_velocity() {
        let t0 = Instant::now();
        let bounds = OffsetBounds::new(0.0, 100.0);
        let mut engine = DragEngine::new(Axis::Vertical);
        engine.changed(&DragSample::vertical(5.0, t0), 0.0, &bounds);
        let release = engine.ended(&DragSample::vertical(5.0, t0), &bounds).expect("release");
        assert_eq!(release.velocity, None);
    }

    #[test]
    fn negative_sign_normalizes_outward_motion() {
        let t0 = Instant::now();
        let bounds = OffsetBounds::new(0.0, 0.0).with_dismiss_limit(300.0);
        let mut engine = DragEngine::with_sign(Axis::Horizontal, -1.0);
        assert_eq!(engine.changed(&DragSample::horizontal(-50.0, t0), 0.0, &bounds), 50.0);
        assert_eq!(engine.changed(&DragSample::horizontal(30.0, t0 + ms(10)), 0.0, &bounds), 0.0);
        let release = engine
            .ended(&DragSample::horizontal(-120.0, t0 + ms(20)), &bounds)
            .expect("release");
        assert_eq!(release.offset, 120.0);
        assert!(release.velocity.expect("velocity") > 0.0);
    }

    #[test]
    fn cancel_returns_origin() {
        let t0 = Instant::now();
        let bounds = OffsetBounds::new(0.0, 100.0);
        let mut engine = DragEngine::new(Axis::Vertical);
        assert_eq!(engine.cancel(), None);
        engine.changed(&DragSample::vertical(5.0, t0), 42.0, &bounds);
        assert_eq!(engine.cancel(), Some(42.0));
        assert!(!engine.is_dragging());
    }

    proptest::proptest! {
        #[test]
        fn offsets_stay_within_bounds(
            origin in 100.0f64..600.0,
            moves in proptest::collection::vec(-1500.0f64..1500.0, 1..30),
            dismissable in proptest::bool::ANY,
        ) {
            let t0 = Instant::now();
            let mut bounds = OffsetBounds::new(100.0, 600.0);
            if dismissable {
                bounds = bounds.with_dismiss_limit(800.0);
            }
            let ceiling = if dismissable { 800.0 } else { 600.0 };
            let mut engine = DragEngine::new(Axis::Vertical);
            for (i, translation) in moves.iter().enumerate() {
                let at = t0 + ms(i as u64 * 8);
                let offset = engine.changed(&DragSample::vertical(*translation, at), origin, &bounds);
                proptest::prop_assert!((100.0..=ceiling).contains(&offset));
            }
            let end = t0 + ms(moves.len() as u64 * 8);
            let last = moves.last().copied().unwrap_or_default();
            let release = engine.ended(&DragSample::vertical(last, end), &bounds);
            let release = release.expect("active session");
            proptest::prop_assert!((100.0..=ceiling).contains(&release.offset));
            proptest::prop_assert!(!engine.is_dragging());
        }
    }
}
