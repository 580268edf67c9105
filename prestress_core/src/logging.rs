//! Logging setup for applications embedding prestress_core.
//!
//! The library only emits `tracing` events: `debug` when materials and
//! homogenized sections are built, `info` for analysis verdicts and project
//! I/O, `warn` for failing stress checks. Nothing is printed unless the host
//! installs a subscriber, either its own or one from this module.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a compact subscriber at INFO, overridable with RUST_LOG.
///
/// Returns false if a global subscriber was already installed.
pub fn init() -> bool {
    init_with_level("info")
}

/// Install a compact subscriber with a default level
///
/// # Arguments
/// * `default_level` - Default filter directive (e.g. "debug", "prestress_core=debug")
///
/// RUST_LOG still takes precedence.
pub fn init_with_level(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .is_ok()
}

/// Route debug logs to the test harness output
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
