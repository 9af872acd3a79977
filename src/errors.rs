//! Unified error types for invoice-desk.
//!
//! Every fallible operation in the crate returns [`Result`], so callers can use `?`
//! across computation, storage, and configuration code alike.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable cause
        message: String,
    },

    /// A draft form file could not be parsed
    #[error("Invalid draft {path}: {message}")]
    InvalidDraft {
        /// Draft file path
        path: String,
        /// Parser message
        message: String,
    },

    /// The storage backend failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A record could not be encoded or decoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An index does not address an element of the collection
    #[error("Index {index} is out of range for a collection of length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Collection length at the time of the request
        len: usize,
    },

    /// A form field failed strict validation
    #[error("Invalid value for {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// An amount that must be non-negative was negative or not a number
    #[error("Amount {amount} cannot be expressed in words")]
    NegativeAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A stored element did not decode into the expected record shape
    #[error("Saved record #{index} is malformed: {message}")]
    MalformedRecord {
        /// Position of the element in its collection
        index: usize,
        /// Decoder message
        message: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
