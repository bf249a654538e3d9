//! # Logging
//!
//! Installs the process-wide `tracing` subscriber.
//!
//! The filter comes from `RUST_LOG` when set and valid, otherwise from
//! [`LoggingConfig::level`]. Output is human-readable by default, or one JSON
//! object per line when [`LoggingConfig::json`] is set.

use crate::application::error::InfrastructureError;
use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Builds the filter for the given settings.
///
/// # Errors
///
/// Returns `InfrastructureError::Configuration` if `RUST_LOG` is unset and
/// the configured level is not a valid filter directive.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, InfrastructureError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            InfrastructureError::configuration(format!("logging level {:?}: {e}", config.level))
        }),
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns `InfrastructureError::Configuration` if the filter is invalid or
/// a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    installed.map_err(|e| InfrastructureError::configuration(format!("tracing: {e}")))
}
