#![forbid(unsafe_code)]

//! Presentation infrastructure: host and layers, lifecycle, animation, and
//! container-relative sizing.
//!
//! # Lifecycle
//!
//! Every presented surface runs the same [`PresentationLifecycle`]:
//! `Hidden → Presenting → Presented → Dismissing → Hidden`. The lifecycle
//! emits a `progress` value in `[0, 1]`; mapping it to scale, opacity, or a
//! slide is the renderer's job.
//!
//! # Triggers
//!
//! Callers own the presentation state (a flag, an optional item, an
//! optional error) as an `Observable`. A [`PresentationTrigger`] reads it and
//! writes "not presented" back when the user dismisses a surface, so the
//! caller's state and the host never disagree for longer than one
//! [`PresentationHost::update`].
//!
//! # Example
//!
//! ```ignore
//! use modalkit_widgets::modal::{Presentation, PresentationHost, PresentationTrigger};
//!
//! let flag = Observable::new(true);
//! host.present(
//!     Presentation::new("settings", PresentationTrigger::flag(&flag), sheet)
//!         .on_dismiss(|| save_settings()),
//! );
//! ```

mod animation;
mod container;
mod host;
mod lifecycle;
mod trigger;

#[cfg(feature = "serde")]
pub(crate) use animation::duration_ms;
pub use animation::{AnimatedValue, BasicAnimation, Easing, Transition};
pub use container::{Dimension, Orientational, SizeSpec, SurfaceSize};
pub use host::{
    ContainerChange, DEFAULT_LAYER, DrawEntry, HostEvent, Presentation, PresentationHost,
    PresentedSurface, SurfaceContext, SurfaceKind, SurfaceResponse,
};
pub use lifecycle::{
    ButtonAction, DismissMethods, DismissTrigger, LifecycleAnimations, LifecycleEvent,
    PresentationLifecycle, PresentationPhase,
};
pub use trigger::{PresentationTrigger, TriggerKind};
