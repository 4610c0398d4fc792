//! Tracing subscriber setup.
//!
//! Log output goes to stderr, or to a file through a non-blocking
//! `tracing-appender` writer when one is configured. `RUST_LOG` takes
//! precedence over the configured level.

use std::path::PathBuf;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging settings, the `[logging]` config section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive, usually a plain level such as `info`.
    pub level: String,
    /// Optional log file; stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Override the level, e.g. from a `--verbose` flag.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

/// Errors that can occur while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level is not a valid filter directive.
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    /// The log file path has no usable file name.
    #[error("Invalid log file path: {0}")]
    InvalidFile(PathBuf),

    /// The log file or its directory could not be created.
    #[error("Failed to open log file {}: {reason}", .path.display())]
    File { path: PathBuf, reason: String },

    /// A global subscriber is already installed.
    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Build the filter for a configured level, without consulting `RUST_LOG`.
pub fn filter_for(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidFilter {
        filter: level.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber.
///
/// Returns the appender guard when logging to a file; keep it alive for the
/// lifetime of the program so buffered lines are flushed.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_for(&config.level)?,
    };
    let timer = LocalTime::new(Rfc3339);

    match &config.file {
        Some(path) => {
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| LoggingError::InvalidFile(path.clone()))?;
            let directory = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(directory)
                .map_err(|e| LoggingError::File {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_timer(timer)
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
                .map_err(|e| LoggingError::Install(e.to_string()))?;

            tracing::debug!(file = %path.display(), "Logging to file");
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_timer(timer)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| LoggingError::Install(e.to_string()))?;
            Ok(None)
        }
    }
}
