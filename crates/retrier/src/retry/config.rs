//! Retry configuration snapshot and its builder

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::types::RetryPolicy;

use super::executor::RetryExecutor;
use super::observer::{NoOpObserver, RetryObserver};

/// Default number of attempts, including the first one
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default base delay between attempts
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Default delay multiplier
pub const DEFAULT_DELAY_FACTOR: u32 = 1;

/// Predicate deciding whether a failed attempt ends the retry loop
///
/// Returning `true` stops immediately with the error that was passed in.
pub type StopRetryIfFn<E> = Box<dyn Fn(&CancellationToken, &E) -> bool + Send + Sync>;

/// Hook invoked after every failed attempt that was not stopped
///
/// Receives the 1-based number of the failed attempt. Returning `Err` aborts
/// execution and the hook's error replaces the operation's error.
pub type OnRetryFn<E> = Box<dyn Fn(&CancellationToken, u32) -> std::result::Result<(), E> + Send + Sync>;

/// Immutable retry configuration
///
/// Built once by `RetryExecutorBuilder` and never mutated while an
/// execution is running.
pub struct RetryConfig<E> {
    pub(super) max_attempts: u32,
    pub(super) delay: Duration,
    pub(super) delay_factor: u32,
    pub(super) stop_retry_if: Option<StopRetryIfFn<E>>,
    pub(super) on_retry: Option<OnRetryFn<E>>,
    pub(super) observer: Arc<dyn RetryObserver>,
}

impl<E> RetryConfig<E> {
    /// Total number of attempts, including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Base delay between attempts
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Multiplier applied to the base delay
    pub fn delay_factor(&self) -> u32 {
        self.delay_factor
    }

    /// Whether a stop predicate is configured
    pub fn has_stop_retry_if(&self) -> bool {
        self.stop_retry_if.is_some()
    }

    /// Whether an on-retry hook is configured
    pub fn has_on_retry(&self) -> bool {
        self.on_retry.is_some()
    }
}

impl<E> Default for RetryConfig<E> {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
            delay_factor: DEFAULT_DELAY_FACTOR,
            stop_retry_if: None,
            on_retry: None,
            observer: Arc::new(NoOpObserver),
        }
    }
}

impl<E> fmt::Debug for RetryConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryConfig")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .field("delay_factor", &self.delay_factor)
            .field("stop_retry_if", &self.stop_retry_if.is_some())
            .field("on_retry", &self.on_retry.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a `RetryExecutor`
///
/// Setters apply in call order over the defaults; calling the same setter
/// twice keeps the last value.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use retrier::retry::{RetryExecutorBuilder, TracingObserver};
///
/// let executor = RetryExecutorBuilder::<std::io::Error>::new()
///     .with_max_attempts(3)
///     .with_delay(Duration::from_millis(250))
///     .with_delay_factor(2)
///     .with_observer(TracingObserver::new("fetch"))
///     .build()
///     .unwrap();
///
/// assert_eq!(executor.config().max_attempts(), 3);
/// ```
pub struct RetryExecutorBuilder<E> {
    config: RetryConfig<E>,
}

impl<E> Default for RetryExecutorBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> RetryExecutorBuilder<E> {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: RetryConfig::default(),
        }
    }

    /// Set the total number of attempts
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    /// Set the base delay between attempts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Set the delay multiplier
    ///
    /// The wait after attempt `n` is `delay * factor * n`.
    pub fn with_delay_factor(mut self, factor: u32) -> Self {
        self.config.delay_factor = factor;
        self
    }

    /// Apply attempts, delay and factor from a deserialized policy
    pub fn with_policy(self, policy: &RetryPolicy) -> Self {
        self.with_max_attempts(policy.max_attempts)
            .with_delay(policy.delay())
            .with_delay_factor(policy.delay_factor)
    }

    /// Set the stop predicate
    pub fn with_stop_retry_if<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CancellationToken, &E) -> bool + Send + Sync + 'static,
    {
        self.config.stop_retry_if = Some(Box::new(predicate));
        self
    }

    /// Set the on-retry hook
    pub fn with_on_retry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CancellationToken, u32) -> std::result::Result<(), E> + Send + Sync + 'static,
    {
        self.config.on_retry = Some(Box::new(hook));
        self
    }

    /// Set the observer
    ///
    /// The observer receives callbacks during execution but cannot change
    /// its outcome.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: RetryObserver + 'static,
    {
        self.config.observer = Arc::new(observer);
        self
    }

    /// Validate the configuration and build the executor
    pub fn build(self) -> Result<RetryExecutor<E>> {
        if self.config.max_attempts == 0 {
            return Err(Error::ZeroMaxAttempts);
        }
        Ok(RetryExecutor::new(self.config))
    }
}
