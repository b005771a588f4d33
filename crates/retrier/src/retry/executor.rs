//! Retry execution engine
//!
//! The control loop: run the operation, consult the stop predicate, run the
//! on-retry hook, then wait out the linear backoff unless the cancellation
//! token fires first.

use std::fmt::{self, Display};
use std::future::Future;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::backoff::calculate_delay;
use super::config::RetryConfig;

/// Execute an async operation with the default retry configuration
///
/// Equivalent to building a `RetryExecutor` with no overrides: 10 attempts,
/// 100ms base delay, factor 1, no stop predicate and no hook.
///
/// # Example
///
/// ```rust,no_run
/// use retrier::{retry, CancellationToken};
///
/// async fn example() -> Result<u32, std::io::Error> {
///     let token = CancellationToken::new();
///     retry(&token, || async { Ok(42) }).await
/// }
/// ```
pub async fn retry<F, Fut, T, E>(token: &CancellationToken, op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    RetryExecutor::new(RetryConfig::default())
        .execute(token, op)
        .await
}

/// A retry executor bound to one immutable `RetryConfig`
///
/// Use `RetryExecutorBuilder` to create an instance. The executor holds no
/// mutable state, so one instance can serve any number of concurrent
/// `execute` calls.
pub struct RetryExecutor<E> {
    config: RetryConfig<E>,
}

impl<E> fmt::Debug for RetryExecutor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("config", &self.config)
            .finish()
    }
}

impl<E> RetryExecutor<E> {
    pub(super) fn new(config: RetryConfig<E>) -> Self {
        Self { config }
    }

    /// The configuration snapshot this executor runs with
    pub fn config(&self) -> &RetryConfig<E> {
        &self.config
    }
}

impl<E> RetryExecutor<E>
where
    E: Display,
{
    /// Execute an operation with retry logic
    ///
    /// # Arguments
    ///
    /// * `token` - Cancellation signal, observed only while waiting between
    ///   attempts. An in-flight operation is never interrupted.
    /// * `op` - A closure that returns a future representing one attempt
    ///
    /// # Returns
    ///
    /// `Ok` from the first successful attempt. Otherwise exactly one of:
    /// the last operation error (exhaustion, stop predicate, cancellation)
    /// or the on-retry hook's error. Errors are returned unchanged.
    pub async fn execute<F, Fut, T>(&self, token: &CancellationToken, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let config = &self.config;
        let observer = &config.observer;
        let start = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            observer.on_attempt_start(attempt, config.max_attempts);

            let err = match op().await {
                Ok(value) => {
                    observer.on_success(attempt, start.elapsed());
                    return Ok(value);
                }
                Err(err) => err,
            };

            if let Some(stop_retry_if) = &config.stop_retry_if {
                if stop_retry_if(token, &err) {
                    observer.on_stopped(attempt, &err);
                    return Err(err);
                }
            }

            if let Some(on_retry) = &config.on_retry {
                if let Err(hook_err) = on_retry(token, attempt) {
                    observer.on_vetoed(attempt, &hook_err);
                    return Err(hook_err);
                }
            }

            // No wait after the last attempt
            if attempt >= config.max_attempts {
                observer.on_exhausted(attempt, &err);
                return Err(err);
            }

            let delay = calculate_delay(config.delay, config.delay_factor, attempt);
            observer.on_attempt_failed(attempt, &err, delay);

            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    observer.on_cancelled(attempt, &err);
                    return Err(err);
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
