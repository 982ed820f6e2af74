//! Subscriber installation.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::{TelemetryConfig, TelemetryError};

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    File(PathBuf),
}

/// Handle returned once the global subscriber is installed.
#[derive(Debug, Clone)]
pub struct LoggingHandle {
    pub target: LogTarget,
    pub json: bool,
}

/// Parse the configured filter directive.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {:?}: {}", config.log_level, e)))
}

fn open_log_file(path: &PathBuf) -> Result<File, TelemetryError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| TelemetryError::LogFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Install the global `tracing` subscriber.
///
/// Can only succeed once per process; later calls return
/// `TelemetryError::AlreadyInitialized`.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingHandle, TelemetryError> {
    let env_filter = build_filter(config)?;

    let (layer, target): (BoxedLayer, LogTarget) = match &config.log_file {
        Some(path) => {
            let writer = Mutex::new(open_log_file(path)?);
            let layer = if config.json_logs {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(writer)
                    .boxed()
            } else {
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed()
            };
            (layer, LogTarget::File(path.clone()))
        }
        None => {
            let layer = if config.json_logs {
                // JSON output for containers/production
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .boxed()
            } else {
                // Pretty output for development
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .boxed()
            };
            (layer, LogTarget::Stdout)
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Logging initialized"
    );

    Ok(LoggingHandle {
        target,
        json: config.json_logs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_config_error() {
        let config = TelemetryConfig {
            log_level: "cms=notalevel".to_string(),
            ..Default::default()
        };
        assert!(matches!(build_filter(&config), Err(TelemetryError::Config(_))));
    }

    #[test]
    fn test_unwritable_log_file_is_reported() {
        let config = TelemetryConfig::default().with_log_file("/nonexistent-dir/cms/admin.log");
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::LogFile { .. })
        ));
    }

    // The only test that installs the global subscriber.
    #[test]
    fn test_file_logging_then_reinit_fails() {
        let path = std::env::temp_dir().join(format!("cms-telemetry-{}.log", std::process::id()));
        let config = TelemetryConfig::default().with_log_file(&path);

        let handle = init_logging(&config).unwrap();
        assert_eq!(handle.target, LogTarget::File(path.clone()));

        tracing::info!(table = "projects", "reload finished");
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("reload finished"));
        assert!(written.contains("table=\"projects\""));

        assert!(matches!(
            init_logging(&TelemetryConfig::default()),
            Err(TelemetryError::AlreadyInitialized(_))
        ));
        let _ = std::fs::remove_file(&path);
    }
}
