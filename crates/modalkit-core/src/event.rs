//! Input events delivered to presented surfaces.
//!
//! The host toolkit translates its pointer/touch recognizers into this
//! two-phase drag interface (`DragChanged` then `DragEnded`) plus a few
//! discrete taps. Translations are cumulative from the gesture's start, the
//! way platform drag recognizers report them.

use crate::geometry::Vector;
use web_time::Instant;

/// One drag callback: cumulative translation and the time it was observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    pub translation: Vector,
    pub timestamp: Instant,
}

impl DragSample {
    #[must_use]
    pub const fn new(translation: Vector, timestamp: Instant) -> Self {
        Self {
            translation,
            timestamp,
        }
    }

    /// Vertical-only sample.
    #[must_use]
    pub const fn vertical(dy: f64, timestamp: Instant) -> Self {
        Self::new(Vector::new(0.0, dy), timestamp)
    }

    /// Horizontal-only sample.
    #[must_use]
    pub const fn horizontal(dx: f64, timestamp: Instant) -> Self {
        Self::new(Vector::new(dx, 0.0), timestamp)
    }
}

/// An interaction routed to a single presented surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// The drag moved.
    DragChanged(DragSample),
    /// The drag finished (finger lifted).
    DragEnded(DragSample),
    /// The recognizer was reset without an end callback (app backgrounded,
    /// gesture stolen by another recognizer).
    DragCancelled,
    /// Tap on the dimmed area behind the surface.
    BackTap,
    /// Tap on the surface's close button.
    CloseButton,
    /// Tap on the button at the given index (alerts).
    ButtonTap(usize),
}

impl SurfaceEvent {
    /// Whether this event belongs to a drag gesture.
    #[must_use]
    pub const fn is_drag(&self) -> bool {
        matches!(
            self,
            Self::DragChanged(_) | Self::DragEnded(_) | Self::DragCancelled
        )
    }
}
