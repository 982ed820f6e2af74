//! # CMS Telemetry
//!
//! Structured logging for the admin tools.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cms_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let _logging = init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUST_LOG` | | Full filter directive, wins over `CMS_LOG_LEVEL` |
//! | `CMS_LOG_LEVEL` | `info` | Log level filter |
//! | `CMS_JSON_LOGS` | `false` | One JSON object per line |
//! | `CMS_LOG_FILE` | | Write to this file instead of stdout |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging, LogTarget, LoggingHandle};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to open log file {path}: {reason}")]
    LogFile { path: String, reason: String },

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}
