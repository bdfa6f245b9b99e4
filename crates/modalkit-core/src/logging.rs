//! Structured JSON logging bootstrap.
//!
//! Installs a global `tracing` subscriber that writes one JSON object per
//! event to stderr. The filter is read from `MODALKIT_LOG`, then `RUST_LOG`,
//! and defaults to `info`.
//!
//! ```ignore
//! modalkit_core::logging::init_tracing();
//! tracing::debug!(surface = "bottom_sheet", "presented");
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "MODALKIT_LOG";

/// Build the filter from the environment.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the JSON subscriber, returning an error if one is already set.
pub fn try_init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()
}

/// Install the JSON subscriber, ignoring an already-installed one.
pub fn init_tracing() {
    let _ = try_init_tracing();
}
