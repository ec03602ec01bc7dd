//! # Logging
//!
//! Tracing subscriber setup for hosts and tests.

use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_LEVEL_ENV_VAR: &str = "PAGELINK_LOG";

/// Install a stderr fmt subscriber filtered by `PAGELINK_LOG`.
///
/// Falls back to `error` when the variable is unset or unparsable. Calling
/// it again after a subscriber is installed does nothing.
pub fn init_tracing() {
    let mut filter =
        EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("error"));
    for directive in ["tokio=warn", "tokio_stream=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init();
    if installed.is_ok() {
        tracing::debug!("Tracing initialized");
    }
}
