#![forbid(unsafe_code)]

//! Presentation lifecycle: the four-phase state machine every surface runs.
//!
//! ```text
//!          present()               appear done
//! Hidden ───────────▶ Presenting ─────────────▶ Presented
//!   ▲                     │ dismiss() (latched)     │ dismiss()
//!   │   disappear done    ▼                         ▼
//!   └──────────────── Dismissing ◀──────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `on_present` runs exactly once per cycle, when the appear transition
//!    completes.
//! 2. `on_dismiss` runs exactly once per cycle, when the disappear
//!    transition completes, after any deferred completion action.
//! 3. A dismiss requested while presenting is latched and applied after
//!    `on_present`; it is never lost and never applied twice.
//! 4. Dismissing or hidden lifecycles ignore further dismiss requests.
//!
//! # Failure Modes
//!
//! - `present()` outside `Hidden` returns `false` and changes nothing.
//! - `dismiss()` while `Dismissing`/`Hidden` returns `false`.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use modalkit_core::Instant;

use super::animation::{BasicAnimation, Transition};

/// Action deferred until a surface has finished animating out.
pub type ButtonAction = Rc<dyn Fn()>;

/// Where a surface is in its presentation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationPhase {
    #[default]
    Hidden,
    Presenting,
    Presented,
    Dismissing,
}

impl PresentationPhase {
    /// Whether the surface is mounted (any phase but `Hidden`).
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// What initiated a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissTrigger {
    /// The caller's presentation flag went false.
    Binding,
    /// `PresentationHost::dismiss` was called.
    External,
    BackTap,
    CloseButton,
    /// An alert button was tapped.
    Button,
    Timeout,
    Swipe,
    DragBack,
    PullDown,
}

impl DismissTrigger {
    /// Whether the dismissal came from a drag gesture.
    #[must_use]
    pub const fn is_gesture(self) -> bool {
        matches!(self, Self::Swipe | Self::DragBack | Self::PullDown)
    }
}

bitflags! {
    /// User interactions a surface accepts as a dismissal request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DismissMethods: u8 {
        const BACK_TAP = 1 << 0;
        const LEADING_BUTTON = 1 << 1;
        const TRAILING_BUTTON = 1 << 2;
        const SWIPE = 1 << 3;
        const PULL_DOWN = 1 << 4;
        const DRAG_BACK = 1 << 5;
        const TIMEOUT = 1 << 6;
    }
}

impl DismissMethods {
    /// Whether a header close button is shown.
    #[must_use]
    pub const fn has_close_button(self) -> bool {
        self.intersects(Self::LEADING_BUTTON.union(Self::TRAILING_BUTTON))
    }
}

/// Animations used by a lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LifecycleAnimations {
    pub appear: BasicAnimation,
    pub disappear: BasicAnimation,
    /// Used instead of `disappear` when a drag gesture dismisses the surface.
    pub gesture_dismiss: Option<BasicAnimation>,
}

impl LifecycleAnimations {
    /// Animation to use for a dismissal initiated by `trigger`.
    #[must_use]
    pub fn for_dismiss(&self, trigger: DismissTrigger) -> BasicAnimation {
        match self.gesture_dismiss {
            Some(animation) if trigger.is_gesture() => animation,
            _ => self.disappear,
        }
    }
}

impl Default for LifecycleAnimations {
    fn default() -> Self {
        Self {
            appear: BasicAnimation::default(),
            disappear: BasicAnimation::default(),
            gesture_dismiss: None,
        }
    }
}

/// A completed phase change reported by [`PresentationLifecycle::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Appear finished; `on_present` has run.
    Presented,
    /// Disappear finished; `on_dismiss` has run.
    Dismissed,
}

/// The per-surface presentation state machine.
pub struct PresentationLifecycle {
    phase: PresentationPhase,
    /// Drives content visibility; flips at the start of each animation.
    internal_presented: bool,
    transition: Option<Transition>,
    animations: LifecycleAnimations,
    pending_dismiss: Option<DismissTrigger>,
    dismiss_trigger: Option<DismissTrigger>,
    completion: Option<ButtonAction>,
    on_present: Option<Box<dyn FnMut()>>,
    on_dismiss: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for PresentationLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationLifecycle")
            .field("phase", &self.phase)
            .field("internal_presented", &self.internal_presented)
            .field("pending_dismiss", &self.pending_dismiss)
            .field("dismiss_trigger", &self.dismiss_trigger)
            .field("has_completion", &self.completion.is_some())
            .finish()
    }
}

impl PresentationLifecycle {
    /// Create a hidden lifecycle.
    #[must_use]
    pub fn new(animations: LifecycleAnimations) -> Self {
        Self {
            phase: PresentationPhase::Hidden,
            internal_presented: false,
            transition: None,
            animations,
            pending_dismiss: None,
            dismiss_trigger: None,
            completion: None,
            on_present: None,
            on_dismiss: None,
        }
    }

    /// Set the callback run when appear completes.
    pub fn set_on_present(&mut self, callback: impl FnMut() + 'static) {
        self.on_present = Some(Box::new(callback));
    }

    /// Set the callback run when disappear completes.
    pub fn set_on_dismiss(&mut self, callback: impl FnMut() + 'static) {
        self.on_dismiss = Some(Box::new(callback));
    }

    // --- Queries ---

    #[must_use]
    pub fn phase(&self) -> PresentationPhase {
        self.phase
    }

    #[must_use]
    pub fn animations(&self) -> &LifecycleAnimations {
        &self.animations
    }

    /// Whether content should be shown as presented.
    ///
    /// `true` from the start of appear until the start of disappear.
    #[must_use]
    pub fn is_internally_presented(&self) -> bool {
        self.internal_presented
    }

    /// Trigger of the current (or latched) dismissal.
    #[must_use]
    pub fn dismiss_trigger(&self) -> Option<DismissTrigger> {
        self.dismiss_trigger.or(self.pending_dismiss)
    }

    /// Whether a dismissal is latched behind the appear animation.
    #[must_use]
    pub fn has_pending_dismiss(&self) -> bool {
        self.pending_dismiss.is_some()
    }

    /// Instant the running transition completes, if one is running.
    #[must_use]
    pub fn transition_end(&self) -> Option<Instant> {
        self.transition.map(|t| t.finishes_at())
    }

    /// Presentation progress in `[0, 1]`.
    ///
    /// 0 is fully hidden, 1 is fully presented.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        match &self.transition {
            Some(transition) => transition.value_at(now).clamp(0.0, 1.0),
            None if self.internal_presented => 1.0,
            None => 0.0,
        }
    }

    // --- Transitions ---

    /// Begin the appear animation.
    pub fn present(&mut self, now: Instant) -> bool {
        if self.phase != PresentationPhase::Hidden {
            return false;
        }
        self.phase = PresentationPhase::Presenting;
        self.internal_presented = true;
        self.dismiss_trigger = None;
        self.pending_dismiss = None;
        self.completion = None;
        self.transition = Some(Transition::new(0.0, 1.0, now, self.animations.appear));
        true
    }

    /// Request dismissal.
    ///
    /// From `Presented` the disappear animation starts at `now`. From
    /// `Presenting` the request is latched until appear completes; see
    /// [`take_pending_dismiss`](Self::take_pending_dismiss).
    pub fn dismiss(&mut self, trigger: DismissTrigger, now: Instant) -> bool {
        match self.phase {
            PresentationPhase::Presented => {
                let from = self.progress(now);
                self.phase = PresentationPhase::Dismissing;
                self.internal_presented = false;
                self.dismiss_trigger = Some(trigger);
                let animation = self.animations.for_dismiss(trigger);
                self.transition = Some(Transition::new(from, 0.0, now, animation));
                true
            }
            PresentationPhase::Presenting if self.pending_dismiss.is_none() => {
                self.pending_dismiss = Some(trigger);
                true
            }
            _ => false,
        }
    }

    /// Attach an action to run when the exit animation completes.
    ///
    /// Ignored unless a dismissal is in flight or latched.
    pub fn set_completion(&mut self, action: ButtonAction) -> bool {
        let dismissing = self.phase == PresentationPhase::Dismissing || self.pending_dismiss.is_some();
        if dismissing {
            self.completion = Some(action);
        }
        dismissing
    }

    /// Take the latched dismissal once the surface is presented.
    pub fn take_pending_dismiss(&mut self) -> Option<DismissTrigger> {
        if self.phase == PresentationPhase::Presented {
            self.pending_dismiss.take()
        } else {
            None
        }
    }

    /// Advance to `now`, completing a finished animation.
    pub fn tick(&mut self, now: Instant) -> Option<LifecycleEvent> {
        let finished = self.transition.is_some_and(|t| t.is_finished(now));
        if !finished {
            return None;
        }
        self.transition = None;
        match self.phase {
            PresentationPhase::Presenting => {
                self.phase = PresentationPhase::Presented;
                if let Some(callback) = self.on_present.as_mut() {
                    callback();
                }
                Some(LifecycleEvent::Presented)
            }
            PresentationPhase::Dismissing => {
                self.phase = PresentationPhase::Hidden;
                if let Some(action) = self.completion.take() {
                    action();
                }
                if let Some(callback) = self.on_dismiss.as_mut() {
                    callback();
                }
                Some(LifecycleEvent::Dismissed)
            }
            PresentationPhase::Hidden | PresentationPhase::Presented => None,
        }
    }
}
