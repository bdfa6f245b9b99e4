#![forbid(unsafe_code)]

//! Runtime services for modalkit.
//!
//! Everything here is single-threaded and UI-thread-only: handles are
//! `Rc`-based and deliberately `!Send`.
//!
//! - [`reactive`]: observable values and bindings that model caller-owned
//!   presentation flags.
//! - [`timer`]: a deferred-task [`Scheduler`] used for animation completion
//!   and cancellable timeouts.
//! - [`registry`]: the [`PresentationRegistry`] payload cache.

pub mod reactive;
pub mod registry;
pub mod timer;

pub use reactive::{Binding, Observable, bind_mapped, bind_observable};
pub use registry::{PresentationRecord, PresentationRegistry};
pub use timer::{Scheduler, TaskHandle, TaskId};
