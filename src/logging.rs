//! Tracing subscriber setup
//!
//! The library only emits `tracing` events; binaries call [`init`] once to
//! print them. The filter comes from `RUST_LOG` when set, otherwise
//! `info` with the database driver turned down to `warn`.

use crate::error::{BookcaseError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

fn build_env_filter(default: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default).map_err(|e| {
            BookcaseError::ConfigurationError(format!(
                "Invalid tracing filter '{}': {}",
                default, e
            ))
        }),
    }
}

/// Install the global subscriber, logging to stderr
///
/// # Errors
/// `ConfigurationError` if a subscriber is already installed or the
/// filter does not parse.
pub fn init() -> Result<()> {
    init_with_filter(DEFAULT_FILTER)
}

/// Like [`init`], with a different fallback filter (e.g. `debug` for `-v`)
pub fn init_with_filter(default: &str) -> Result<()> {
    let filter = build_env_filter(default)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| BookcaseError::ConfigurationError(format!("Logging already initialized: {}", e)))?;

    tracing::trace!(filter = default, "logging initialized");
    Ok(())
}
