#![forbid(unsafe_code)]

use anteroom_store::StoreError;
use thiserror::Error;

/// Cache layer errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A referenced blob vanished between persist and load.
    #[error("cached file not found: {0}")]
    NotFound(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Key-value backend failure, propagated as-is. The cache adds no retry.
    #[error("cache backend error: {0}")]
    Backend(String),
}

pub type CacheResult<T> = Result<T, CacheError>;
