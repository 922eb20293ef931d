//! Logging utilities for waste-movement-tests
//!
//! Re-exports tracing macros with log_* naming convention for consistency.

// Re-export tracing macros with log_* naming
pub use tracing::{
    debug as log_debug,
    error as log_error,
    info as log_info,
    warn as log_warn,
};

/// Install a fmt subscriber honouring `RUST_LOG` (defaults to `info`).
///
/// Safe to call more than once; later calls are ignored so every test binary
/// can call it from its shared setup.
pub fn init_test_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
