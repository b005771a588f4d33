//! Cancellation helpers
//!
//! The executor takes a plain `CancellationToken`. Deadlines are expressed
//! as a child token that cancels itself once the timeout elapses, owned by a
//! `Deadline` guard that cancels it on drop.

use std::ops::Deref;
use std::time::Duration;

use tokio_util::sync::{CancellationToken, DropGuard};

/// A deadline token and the guard that ends its timer
///
/// Derefs to `CancellationToken`, so `&deadline` can be passed straight to
/// `RetryExecutor::execute`. Dropping the `Deadline` cancels the token, which
/// stops the timer task; clones of the token taken earlier see that
/// cancellation too.
#[derive(Debug)]
pub struct Deadline {
    token: CancellationToken,
    _guard: DropGuard,
}

impl Deadline {
    /// The deadline token
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Deref for Deadline {
    type Target = CancellationToken;

    fn deref(&self) -> &CancellationToken {
        &self.token
    }
}

/// Derive a deadline cancelled when `parent` is, after `timeout`, or on drop
///
/// Cancelling the deadline never affects `parent`. The timer task exits as
/// soon as any of the three fires.
///
/// # Panics
///
/// Panics when called outside of a tokio runtime.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use retrier::retry::with_timeout;
/// use retrier::CancellationToken;
///
/// # async fn example() {
/// let root = CancellationToken::new();
/// let deadline = with_timeout(&root, Duration::from_secs(5));
/// assert!(!deadline.is_cancelled());
/// # }
/// ```
pub fn with_timeout(parent: &CancellationToken, timeout: Duration) -> Deadline {
    let token = parent.child_token();
    let timer = token.clone();

    tokio::spawn(async move {
        tokio::select! {
            _ = timer.cancelled() => {}
            _ = tokio::time::sleep(timeout) => {
                tracing::debug!(timeout_ms = timeout.as_millis() as u64, "retry deadline reached");
                timer.cancel();
            }
        }
    });

    Deadline {
        _guard: token.clone().drop_guard(),
        token,
    }
}
