//! Server Error Types

use thiserror::Error;

/// Errors that can occur while configuring or running the endpoint
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration could not be loaded or decoded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Log level string not recognised
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// A global subscriber was already installed
    #[error("Logging setup failed: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Bind or accept failure
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
