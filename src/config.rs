//! Store configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Store used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "tournament.db";

/// Environment variable overriding the configured store.
pub const DATABASE_URL_ENV: &str = "TOURNAMENT_DATABASE_URL";

/// Where the tournament store lives.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database path.
    #[serde(default = "default_database_url")]
    database_url: String,
}

#[instrument]
fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl StoreConfig {
    /// Creates a configuration pointing at the given store.
    #[instrument]
    pub fn new(database_url: String) -> Self {
        Self { database_url }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(database_url = %config.database_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise starts from defaults, then
    /// applies [`DATABASE_URL_ENV`].
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            debug!("Config file not found, using defaults");
            Self::default()
        };

        Ok(config.with_override(std::env::var(DATABASE_URL_ENV).ok()))
    }

    /// Replaces the store location when an override is present and non-empty.
    #[instrument(skip(self))]
    pub fn with_override(self, database_url: Option<String>) -> Self {
        match database_url {
            Some(url) if !url.trim().is_empty() => {
                info!(database_url = %url, "Overriding database url");
                Self { database_url: url }
            }
            _ => self,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
