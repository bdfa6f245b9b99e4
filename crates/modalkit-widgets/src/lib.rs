#![forbid(unsafe_code)]

//! Presentation host, gestures, and the built-in surfaces for modalkit.
//!
//! - [`modal`]: the host and its layers, the presentation lifecycle,
//!   animations, and container-relative sizing.
//! - [`gesture`]: the drag engine and the detent/snap resolver.
//! - [`surface`]: alert, modal, bottom sheet, side bar, and notification.
//! - `config` (feature `policy-config`): TOML loading for surface configs.

#[cfg(feature = "policy-config")]
pub mod config;
pub mod gesture;
pub mod modal;
pub mod surface;

#[cfg(feature = "policy-config")]
pub use config::SurfaceConfigs;
pub use gesture::{
    Detent, DetentUnit, Detents, DragEngine, DragRelease, OffsetBounds, ResolvedDetents,
    SnapAction, SnapPolicy,
};
pub use modal::{
    AnimatedValue, BasicAnimation, ContainerChange, DEFAULT_LAYER, DismissMethods,
    DismissTrigger, DrawEntry, Easing, HostEvent, LifecycleAnimations, Orientational,
    Presentation, PresentationHost, PresentationLifecycle, PresentationPhase,
    PresentationTrigger, PresentedSurface, SizeSpec, SurfaceContext, SurfaceKind,
    SurfaceResponse, SurfaceSize,
};
pub use surface::{
    Alert, AlertButton, AlertButtonRole, AlertConfig, BottomSheet, BottomSheetConfig,
    DismissDistance, Modal, ModalConfig, Notification, NotificationConfig, NotificationEdge,
    SideBar, SideBarConfig,
};
