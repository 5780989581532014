//! Server configuration

use config::{Config, Environment, File, FileFormat};
use health::HealthConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::Level;

use crate::ServerError;

/// Prefix of environment overrides, e.g. `HEALTH_LISTEN_ADDR`
pub const ENV_PREFIX: &str = "HEALTH";

/// Endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub listen_addr: String,
    /// Maximum log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Aggregator settings; `HEALTH_HEALTH__DELIMITER` overrides the delimiter
    pub health: HealthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            health: HealthConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from an optional config file, then environment overrides
    pub fn load(path: Option<&str>) -> Result<Self, ServerError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse a TOML document; fields it omits keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ServerError> {
        let config = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Configured log level
    pub fn level(&self) -> Result<Level, ServerError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ServerError::InvalidLogLevel(self.log_level.clone()))
    }
}
