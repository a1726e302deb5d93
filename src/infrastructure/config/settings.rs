//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with an environment variable
//! override for the API token, `HASHTREND_API_TOKEN`.
//!
//! # Example
//!
//! ```no_run
//! use hashtrend::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::server::{ServerConfig, API_TOKEN_ENV};
use super::store::StoreConfig;
use super::trending::{TrendingConfig, MAX_TOP_N, MAX_WINDOW_SECS};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults. Load from a
/// TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "hashtrend.db" in the current directory. Ignored by the
    /// memory backend.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Store backend selection.
    #[serde(default)]
    pub store: StoreConfig,

    /// Retention, sweep cadence, cache TTL and listing size.
    #[serde(default)]
    pub trending: TrendingConfig,

    /// HTTP listener and authentication.
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_database_path() -> String {
    "hashtrend.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            store: StoreConfig::default(),
            trending: TrendingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., a zero interval)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// The token in `HASHTREND_API_TOKEN`, if set, is added to the
    /// configured API tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse_toml(&content)?;
        config.add_api_token(std::env::var(API_TOKEN_ENV).ok());
        Ok(config)
    }

    /// Accept an extra API token (typically from the environment).
    pub fn add_api_token(&mut self, token: Option<String>) {
        if let Some(token) = token {
            let token = token.trim();
            if !token.is_empty() && !self.server.api_tokens.iter().any(|t| t == token) {
                self.server.api_tokens.push(token.to_string());
            }
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all values are within acceptable ranges.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        let trending = &self.trending;
        for (field, value) in [
            ("retention_secs", trending.retention_secs),
            ("sweep_interval_secs", trending.sweep_interval_secs),
            ("cache_ttl_secs", trending.cache_ttl_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }
        for (field, value) in [
            ("retention_secs", trending.retention_secs),
            ("cache_ttl_secs", trending.cache_ttl_secs),
        ] {
            if value > MAX_WINDOW_SECS {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be at most {MAX_WINDOW_SECS}"),
                }
                .into());
            }
        }
        if !(1..=MAX_TOP_N).contains(&trending.top_n) {
            return Err(ConfigError::InvalidValue {
                field: "top_n",
                reason: format!("must be between 1 and {MAX_TOP_N}"),
            }
            .into());
        }

        if self.store.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        self.bind_addr()?;

        Ok(())
    }

    /// The HTTP listen address.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.bind` is not a socket address.
    #[allow(clippy::result_large_err)]
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    field: "bind",
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Check the settings only the HTTP server needs.
    ///
    /// # Errors
    ///
    /// Returns an error if no API token is configured.
    #[allow(clippy::result_large_err)]
    pub fn validate_for_serve(&self) -> Result<()> {
        if self.server.token_set().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_tokens",
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
