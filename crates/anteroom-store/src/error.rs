#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used by `anteroom-store`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by blob stores.
///
/// Higher-level crates wrap this error to add domain context (field name,
/// cache key, etc.).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("blob not found: {0}")]
    NotFound(String),

    #[error("operation not supported by this store: {0}")]
    Unsupported(&'static str),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
