//! Store error type.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store rejected or failed the request.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A stored document could not be decoded into the expected shape.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// A record could not be serialized for writing.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
