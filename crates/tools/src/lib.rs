//! Gridpulse Tools
//!
//! CLI tools for running gridpulse scenarios.

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
/// Default is `info`, with `debug` for the gridpulse runtime and tools.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gridpulse_runtime=debug,gridpulse_tools=debug"));

    fmt().with_env_filter(filter).with_target(false).init();
}
