#![forbid(unsafe_code)]

use anteroom_cache::CacheError;
use thiserror::Error;

/// Result type used by `anteroom-flow`.
pub type FlowResult<T> = Result<T, FlowError>;

/// Flow layer errors.
///
/// Validation failures are NOT errors: they re-render the input stage and
/// never surface here.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A stage token outside the known set reached dispatch. Request-borne
    /// tokens are clamped to `input` before dispatch, so this indicates a
    /// wiring bug in the embedding application.
    #[error("invalid stage: {0:?}")]
    InvalidState(String),

    /// Completion reached without a success URL configured.
    #[error("no success URL configured for completed submission")]
    MissingSuccessUrl,

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// The completion hook failed. The cache entry is left intact so the
    /// submission can be retried.
    #[error("completion hook failed: {0}")]
    Completion(#[source] Box<dyn std::error::Error + Send + Sync>),
}
