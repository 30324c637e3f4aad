//! Logging initialisation.
//!
//! With the `telemetry` feature enabled, [`init_logging`] installs a
//! `tracing-subscriber` registry filtered by `RUST_LOG` (or the configured
//! filter). Without the feature it does nothing, leaving the choice of
//! subscriber to the embedding application.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::PageBuilderResult;
use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether a subscriber is installed at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Emit JSON lines instead of human readable output.
    #[serde(default)]
    pub json: bool,

    /// Filter directives used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_enabled() -> bool {
    true
}

fn default_filter() -> String {
    "info,pagebuilder=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            json: false,
            filter: default_filter(),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// Fails if the filter cannot be parsed or a global subscriber is already set.
#[cfg(feature = "telemetry")]
pub fn init_logging(config: &LoggingConfig) -> PageBuilderResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            crate::PageBuilderError::configuration(format!("Invalid log filter '{}': {}", config.filter, e))
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };
    result.map_err(|e| crate::PageBuilderError::configuration(format!("Failed to install subscriber: {e}")))?;

    tracing::info!(json = config.json, filter = %config.filter, "Logging initialized");
    Ok(())
}

/// Placeholder for when the telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_logging(_config: &LoggingConfig) -> PageBuilderResult<()> {
    Ok(())
}
