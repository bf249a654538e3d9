//! # Configuration
//!
//! Process settings, layered from lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. a TOML file: `waitlist.toml` if present, or the path in
//!    `WAITLIST_CONFIG`, which must exist when set
//! 3. environment variables prefixed `WAITLIST__`, with `__` between keys
//!
//! A `.env` file in the working directory is loaded into the environment
//! first, when one exists. A `.env` file that cannot be parsed is an error.
//!
//! ```text
//! WAITLIST__DATABASE__URL=postgres://localhost/waitlist
//! WAITLIST__REGISTRY__CAPACITY=18
//! WAITLIST__REGISTRY__LOCK_SCOPE=per_event
//! WAITLIST__SCHEDULE__WEEKDAY=Sun
//! WAITLIST__LOGGING__JSON=true
//! ```

use crate::application::error::InfrastructureError;
use crate::application::services::{RegistryConfig, ScheduleConfig};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat, FileSourceFile};
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "waitlist.toml";

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "WAITLIST_CONFIG";

const ENV_PREFIX: &str = "WAITLIST";
const ENV_SEPARATOR: &str = "__";

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/waitlist".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete process configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Registry settings.
    pub registry: RegistryConfig,
    /// Weekly schedule settings.
    pub schedule: ScheduleConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads and validates the configuration from `.env`, the config file
    /// and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` if a source cannot be
    /// parsed or a value is out of range.
    pub fn load() -> Result<Self, InfrastructureError> {
        dotenv_loaded(dotenvy::dotenv())?;

        let builder = config::Config::builder()
            .add_source(config_file(std::env::var(CONFIG_PATH_ENV).ok()))
            .add_source(environment());

        Self::from_builder(builder)
    }

    /// Builds and validates a configuration from explicit sources.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` if the sources cannot
    /// be merged or deserialized, or if validation fails.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, InfrastructureError> {
        let config: Self = builder
            .build()
            .and_then(|built| built.try_deserialize())
            .map_err(|e| InfrastructureError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Configuration` describing the first
    /// invalid value.
    pub fn validate(&self) -> Result<(), InfrastructureError> {
        self.registry
            .validate()
            .map_err(|e| InfrastructureError::configuration(format!("registry: {e}")))?;
        self.schedule
            .validate()
            .map_err(|e| InfrastructureError::configuration(format!("schedule: {e}")))?;
        if self.database.max_connections == 0 {
            return Err(InfrastructureError::configuration(
                "database: max_connections must be positive",
            ));
        }
        Ok(())
    }
}

/// Accepts a missing `.env` file and rejects any other load failure.
fn dotenv_loaded<T>(result: Result<T, dotenvy::Error>) -> Result<(), InfrastructureError> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(InfrastructureError::configuration(format!(".env: {e}"))),
    }
}

/// The default file is optional; an explicitly named one is required.
fn config_file(explicit: Option<String>) -> File<FileSourceFile, FileFormat> {
    match explicit {
        Some(path) => File::with_name(&path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
