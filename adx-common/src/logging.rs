//! Tracing subscriber setup for host binaries
//!
//! The engine crate logs through `tracing` macros only; a host calls
//! [`init_tracing`] once at startup to install a subscriber.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes priority when set; otherwise the configured level is
/// used. Repeated calls after the first are no-ops.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
