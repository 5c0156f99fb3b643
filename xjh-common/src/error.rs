//! Common error types for the XJ hub tools

use thiserror::Error;

/// Common result type for hub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the hub crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record with the same identity already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Entity failed validation, or a request parameter was invalid
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Seed document could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
