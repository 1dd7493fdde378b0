use serde::{Deserialize, Serialize};

/// Logging configuration
///
/// The client only emits `tracing` events. The embedding poller reads `level`
/// when it installs its subscriber; nothing in this workspace installs one.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (default: "info")
    /// Options: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(format!("Unknown log level: {other}")),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
