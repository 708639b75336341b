//! Custom error types for chat-ledger
//!
//! Classification and amount extraction never fail, so the only errors the
//! engine produces come from storage access, argument parsing and exports.

use thiserror::Error;

/// The main error type for chat-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside the ledger itself
    #[error("I/O error: {0}")]
    Io(String),

    /// The ledger store could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Validation errors for records about to be stored
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed report arguments supplied by the caller
    #[error("Usage error: {0}")]
    Usage(String),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a usage error carrying the hint shown to the user
    pub fn usage(hint: impl Into<String>) -> Self {
        Self::Usage(hint.into())
    }

    /// Check if this is a storage failure
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }

    /// Check if this is a usage error
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for chat-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
