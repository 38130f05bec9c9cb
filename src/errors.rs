//! Error types for engram.

use thiserror::Error;

/// Main error type for engram operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any write (empty content, malformed vector).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input exceeds the maximum allowed length.
    #[error("Input too long: {actual_length} characters exceeds maximum of {max_length}")]
    InputTooLong {
        max_length: usize,
        actual_length: usize,
    },

    /// Vector length does not match the store's configured dimension.
    #[error("Dimension mismatch: expected {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A memory with this identifier already exists.
    #[error("Duplicate memory id: {0}")]
    DuplicateId(String),

    /// No memory with this identifier.
    #[error("Memory not found: {0}")]
    NotFound(String),

    /// External provider failure (HTTP error, auth, malformed response).
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider call exceeded the configured timeout.
    #[error("Provider timed out: {0}")]
    ProviderTimeout(String),

    /// Record table and vector table disagree. A write-path bug, not a caller error.
    #[error("Consistency violation: {0}")]
    Consistency(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// SQLite error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
