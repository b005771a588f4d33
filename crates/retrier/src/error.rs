//! Error types for retrier
//!
//! Only configuration problems live here. Errors produced by the retried
//! operation or by the on-retry hook are passed back to the caller untouched.

use thiserror::Error;

/// Result type alias using retrier's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors raised while building a `RetryExecutor`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `max_attempts` was set to zero, so the operation would never run
    #[error("max attempts must be at least 1")]
    ZeroMaxAttempts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::ZeroMaxAttempts.to_string(),
            "max attempts must be at least 1"
        );
    }
}
