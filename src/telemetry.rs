//! Diagnostic logging setup for the binary.
//!
//! Library code logs through `tracing` macros only; installing a subscriber
//! is left to the entry point so embedders keep control of output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the log filter from `RUST_LOG`, falling back to
/// [`DEFAULT_LOG_FILTER`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn init_tracing() {
    let installed = tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
