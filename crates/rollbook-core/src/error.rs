//! Error types for the Rollbook core library

use crate::lookup::LookupError;
use thiserror::Error;

/// Main error type for core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A lookup against the record store failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A dataset document could not be deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a dataset file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for Results using the core error type.
pub type Result<T> = std::result::Result<T, Error>;
