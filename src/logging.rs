//! Logging initialization for the `flexdash` binary.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `FLEXDASH_LOG` environment variable. Falls back to the configured level
//! when the variable is unset or invalid.
//!
//! ```bash
//! FLEXDASH_LOG=debug flexdash show dashboard.json
//! FLEXDASH_LOG=flex_dash::dashboard=trace,warn flexdash add ...
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "FLEXDASH_LOG";

/// Builds the filter: `FLEXDASH_LOG` if it parses, otherwise `fallback`.
pub fn env_filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Initialize the tracing subscriber, writing to stderr.
///
/// Does nothing if a global subscriber is already installed.
pub fn init(fallback: LogLevel) {
    let result = fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
