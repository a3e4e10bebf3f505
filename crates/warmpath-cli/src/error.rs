//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Engine error
    #[error("Engine error: {0}")]
    Engine(#[from] warmpath_engine::EngineError),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] warmpath_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Referenced entity not found
    #[error("Not found: {0}")]
    NotFound(String),
}
