#![forbid(unsafe_code)]

//! modalkit: modal presentation and gesture handling for UI toolkits.
//!
//! The host toolkit owns rendering and raw input. modalkit owns *when*
//! surfaces appear and disappear, how drags move them, where they come to
//! rest, and which callbacks fire along the way.
//!
//! # Quick start
//!
//! ```ignore
//! use modalkit::prelude::*;
//!
//! let scheduler = Scheduler::new(Instant::now());
//! let mut host = PresentationHost::new(scheduler, PresentationRegistry::new(), container);
//!
//! let show_settings = Observable::new(true);
//! host.present(
//!     Presentation::new("settings", PresentationTrigger::flag(&show_settings), BottomSheet::default())
//!         .on_dismiss(|| println!("closed")),
//! );
//!
//! // Each frame:
//! for event in host.update(Instant::now()) { /* ... */ }
//! for entry in host.draw_order() { /* render entry.id at entry.z_index */ }
//! ```

// --- Crate re-exports -------------------------------------------------------

pub use modalkit_core;
pub use modalkit_runtime;
pub use modalkit_widgets;

// --- Common types -----------------------------------------------------------

pub use modalkit_core::{
    ConfigError, ContainerGeometry, DragSample, Duration, Edge, Insets, Instant, Orientation,
    Size, SurfaceEvent,
};
pub use modalkit_runtime::{Observable, PresentationRegistry, Scheduler};
pub use modalkit_widgets::{
    HostEvent, Presentation, PresentationHost, PresentationTrigger, PresentedSurface,
};

/// Standard result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

// --- Prelude ----------------------------------------------------------------

pub mod prelude {
    //! Everything needed to present the built-in surfaces.

    pub use modalkit_core::{
        ContainerGeometry, DragSample, Duration, Edge, Insets, Instant, Orientation, Size,
        SurfaceEvent,
    };
    pub use modalkit_runtime::{Observable, PresentationRegistry, Scheduler};
    pub use modalkit_widgets::gesture::Detents;
    pub use modalkit_widgets::modal::{
        DismissMethods, DismissTrigger, HostEvent, Orientational, Presentation,
        PresentationHost, PresentationPhase, PresentationTrigger, PresentedSurface, SizeSpec,
    };
    pub use modalkit_widgets::surface::{
        Alert, AlertButton, BottomSheet, BottomSheetConfig, Modal, ModalConfig, Notification,
        NotificationConfig, SideBar, SideBarConfig,
    };
    #[cfg(feature = "policy-config")]
    pub use modalkit_widgets::config::SurfaceConfigs;
}
