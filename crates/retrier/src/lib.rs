//! # retrier
//!
//! Retry executor for transient-failure-prone async operations:
//! - Linear backoff between attempts (`delay * factor * attempt`)
//! - Early-stop predicate for telling terminal errors from retryable ones
//! - On-retry hook that can veto further attempts
//! - Cooperative cancellation through `CancellationToken`
//! - Serde-friendly `RetryPolicy` for embedding in caller configuration

#![warn(missing_docs)]

pub mod error;
pub mod retry;
pub mod types;

pub use error::{Error, Result};
pub use retry::{retry, RetryConfig, RetryExecutor, RetryExecutorBuilder};
pub use tokio_util::sync::CancellationToken;
pub use types::RetryPolicy;
