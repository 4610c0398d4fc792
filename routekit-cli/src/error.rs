//! CLI error type.

use std::fmt;

use routekit::config::ConfigError;
use routekit::logging::LoggingError;
use routekit::resource::ResourceError;
use routekit::RouteError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded, validated or saved.
    Config(String),
    /// Logging could not be set up.
    Logging(LoggingError),
    /// A route argument was rejected.
    Route(RouteError),
    /// Resource lookup failed.
    Resource(ResourceError),
    /// Output could not be produced.
    Output(String),
    /// The async runtime could not be started.
    Runtime(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(e) => write!(f, "Logging error: {}", e),
            CliError::Route(e) => write!(f, "Invalid route: {}", e),
            CliError::Resource(e) => write!(f, "Resource error: {}", e),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
            CliError::Runtime(msg) => write!(f, "Failed to create Tokio runtime: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Logging(e) => Some(e),
            CliError::Route(e) => Some(e),
            CliError::Resource(e) => Some(e),
            CliError::Config(_) | CliError::Output(_) | CliError::Runtime(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<RouteError> for CliError {
    fn from(e: RouteError) -> Self {
        CliError::Route(e)
    }
}

impl From<ResourceError> for CliError {
    fn from(e: ResourceError) -> Self {
        CliError::Resource(e)
    }
}
