//! Error types for engine operations

use thiserror::Error;

/// Errors that can occur during engine operations
///
/// Structural errors only: absence of matches or paths is represented as
/// data ("found: false"), never as an error. The engine performs no
/// retries; the caller owns retry policy for store operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Referenced person id absent from the store
    #[error("Unknown person: {0}")]
    UnknownPerson(String),

    /// Relationship kind outside the fixed enumeration
    #[error("Invalid relationship kind: {0}")]
    InvalidKind(String),

    /// Storage layer error
    #[error("Store error: {0}")]
    Store(String),
}
