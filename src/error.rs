//! Error types for the brand sentiment pipeline

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// A record had no tokens left once its text was cleaned
    #[error("Record '{id}' is empty after cleaning")]
    EmptyInput { id: String },

    /// Missing or malformed lexicon, stop-word or threshold configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A collected row could not be turned into a record
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// CSV reading/writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::ConfigError(message.into())
    }

    /// Whether the run can go on after this error.
    ///
    /// Only per-record failures are recoverable; the caller decides whether
    /// to drop or flag the record.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::EmptyInput { .. } | Error::InvalidRecord(_))
    }
}
