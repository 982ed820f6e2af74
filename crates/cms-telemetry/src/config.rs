//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Configuration for structured logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Filter directive (`info`, `cms_01_ordering=debug,warn`, ...)
    pub log_level: String,

    /// Whether to emit JSON lines instead of human-readable output
    pub json_logs: bool,

    /// Log file; stdout when unset
    pub log_file: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "folio-cms".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            log_file: None,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RUST_LOG` or `CMS_LOG_LEVEL`: Filter directive (default: info)
    /// - `CMS_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `CMS_LOG_FILE`: Write logs to a file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            service_name: defaults.service_name,

            log_level: lookup("RUST_LOG")
                .filter(|v| !v.trim().is_empty())
                .or_else(|| lookup("CMS_LOG_LEVEL").filter(|v| !v.trim().is_empty()))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("CMS_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),

            log_file: lookup("CMS_LOG_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Configuration for a named tool.
    pub fn for_tool(name: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = name.to_string();
        config
    }

    /// Send logs to a file. Terminal UIs need this so log lines do not
    /// draw over the screen.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}
