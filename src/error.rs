//! Unified error types for recordstore.
//!
//! Absence is never an error here: lookups return `Option` and mutations on
//! missing records return `false`. Errors are reserved for requests the store
//! cannot honor at all.

use thiserror::Error;

/// All recordstore errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Record handed to `insert` has no usable identifier field
    #[error("record for table '{table}' must have an '{field}' field")]
    MissingIdentifier {
        /// Table the insert targeted
        table: String,
        /// Name of the identifier field
        field: String,
    },

    /// Operation requires an open connection
    #[error("not connected to database")]
    NotConnected,

    /// Query text could not be parsed
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Every retry attempt failed
    #[error("query failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        last: Box<Error>,
    },

    /// Configuration is malformed or out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot input could not be decoded or is inconsistent
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for recordstore operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a missing-identifier error.
    pub fn is_missing_identifier(&self) -> bool {
        matches!(self, Error::MissingIdentifier { .. })
    }

    /// Check if this error was caused by a closed connection.
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Error::NotConnected)
    }
}

// Writer failures surfaced through serde_json stay I/O errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::Serialization(e.to_string())
        }
    }
}
