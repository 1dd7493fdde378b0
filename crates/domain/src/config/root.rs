use serde::{Deserialize, Serialize};
use std::path::Path;

use super::client::ClientConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;

/// Main configuration, usually read from a TOML file:
///
/// ```toml
/// [client]
/// base_url = "http://127.0.0.1:8053"
/// timeout_ms = 5000
/// default_groups = ["server", "view"]
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.client.validate().map_err(ConfigError::Validation)?;
        self.logging.validate().map_err(ConfigError::Validation)?;
        Ok(())
    }
}
