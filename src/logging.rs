use std::io;

use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; stdout is reserved for reports.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();
}
