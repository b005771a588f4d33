//! Retry execution engine
//!
//! Runs a fallible async operation until it succeeds, the attempt budget is
//! spent, a stop predicate declares the error terminal, the on-retry hook
//! vetoes further attempts, or the cancellation token fires during a wait.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use retrier::{CancellationToken, RetryExecutorBuilder};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let token = CancellationToken::new();
//!     let executor = RetryExecutorBuilder::<std::io::Error>::new()
//!         .with_max_attempts(5)
//!         .with_delay(Duration::from_millis(50))
//!         .with_stop_retry_if(|_token, err| err.kind() == std::io::ErrorKind::NotFound)
//!         .build()?;
//!
//!     let body = executor
//!         .execute(&token, || async { Ok::<_, std::io::Error>("payload") })
//!         .await?;
//!     assert_eq!(body, "payload");
//!     Ok(())
//! }
//! ```

mod backoff;
mod config;
mod executor;
mod observer;
mod signal;

pub use backoff::calculate_delay;
pub use config::{
    OnRetryFn, RetryConfig, RetryExecutorBuilder, StopRetryIfFn, DEFAULT_DELAY,
    DEFAULT_DELAY_FACTOR, DEFAULT_MAX_ATTEMPTS,
};
pub use executor::{retry, RetryExecutor};
pub use observer::{NoOpObserver, RetryObserver, StatsObserver, TracingObserver};
pub use signal::{with_timeout, Deadline};
