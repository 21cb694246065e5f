//! Logging setup for the `fs-service` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the process embedding it.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static LOGGING_INIT: OnceLock<bool> = OnceLock::new();

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Only the first call installs anything; later calls return its result.
/// Returns `false` if another global subscriber was already installed.
pub fn init_logging() -> bool {
    *LOGGING_INIT.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(default_env_filter())
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    })
}

fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}
