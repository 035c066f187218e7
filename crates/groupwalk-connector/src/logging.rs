//! Structured logging initialization.
//!
//! Text output for development, JSON for production, level taken from
//! `RUST_LOG` when set and from the configuration otherwise.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set: "trace", "debug",
    /// "info", "warn" or "error".
    #[serde(default = "default_level")]
    pub default_level: String,

    /// Emit JSON log lines instead of human-readable text.
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: default_level(),
            json_format: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Initializes the global tracing subscriber.
///
/// Call once at startup; later calls are no-ops because the global
/// subscriber can only be installed once.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_level.clone()));

    if config.json_format {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true));
        let _ = tracing::subscriber::set_global_default(subscriber);
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true));
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}
