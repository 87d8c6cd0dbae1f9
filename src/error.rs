//! Error types for the Turnstile rate limiter.

use thiserror::Error;

use crate::store::StoreError;

/// Main error type for rate limiter operations.
///
/// A denied acquisition is not an error: `acquire` returns `Ok(false)`.
/// Errors are limited to invalid inputs and store failures.
#[derive(Error, Debug)]
pub enum RateLimitError {
    /// The subject key is empty or contains the reserved delimiter.
    #[error("invalid subject key: {0}")]
    InvalidSubject(String),

    /// The allowance has a non-positive limit or an unusable period.
    #[error("invalid allowance: {0}")]
    InvalidAllowance(String),

    /// A counter store operation failed. Propagated verbatim; the engine
    /// performs no retry and no fallback admit/deny default.
    #[error("counter store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for rate limiter operations.
pub type Result<T> = std::result::Result<T, RateLimitError>;
