use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::group::StatisticGroup;

/// Statistics channel endpoint and HTTP client settings.
///
/// Passed by value at construction time, so several independently configured
/// clients can poll different servers from one process.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the statistics channel (default: "http://localhost:8053").
    /// May carry a root path, document paths are joined below it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Deadline for a whole request, body included, in milliseconds
    /// (default: 10000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Optional HTTP proxy URL (e.g., "http://proxy.local:3128")
    #[serde(default)]
    pub proxy: Option<String>,

    /// Accept self-signed or otherwise invalid TLS certificates (default: false)
    #[serde(default)]
    pub accept_invalid_certs: bool,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Groups fetched when a caller asks for none (default: all groups)
    #[serde(default = "default_groups")]
    pub default_groups: Vec<StatisticGroup>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            proxy: None,
            accept_invalid_certs: false,
            user_agent: default_user_agent(),
            default_groups: default_groups(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url cannot be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("base_url must start with http:// or https://".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than zero".to_string());
        }
        if self.default_groups.is_empty() {
            return Err("default_groups cannot be empty".to_string());
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:8053".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    concat!("bindstats/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_groups() -> Vec<StatisticGroup> {
    StatisticGroup::ALL.to_vec()
}
