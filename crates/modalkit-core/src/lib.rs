#![forbid(unsafe_code)]

//! Core types for modalkit: container geometry, drag/tap input events,
//! configuration errors, and the tracing bootstrap.
//!
//! Nothing in this crate knows about presentation state. It is the
//! vocabulary shared by the runtime and the surfaces built on top of it.

pub mod error;
pub mod event;
pub mod geometry;
#[cfg(feature = "tracing-json")]
pub mod logging;

pub use error::ConfigError;
pub use event::{DragSample, SurfaceEvent};
pub use geometry::{Axis, ContainerGeometry, Edge, Edges, Insets, Orientation, Size, Vector};

/// Re-exported so downstream crates share one clock type.
pub use web_time::{Duration, Instant};
