//! Linear backoff delay computation

use std::time::Duration;

/// Calculate the wait before the attempt following `attempt`
///
/// The delay grows linearly: `delay * factor * attempt`, where `attempt` is
/// the 1-based number of the attempt that just failed. Overflow saturates at
/// `Duration::MAX`.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use retrier::retry::calculate_delay;
///
/// let base = Duration::from_millis(10);
/// assert_eq!(calculate_delay(base, 1, 1), Duration::from_millis(10));
/// assert_eq!(calculate_delay(base, 1, 3), Duration::from_millis(30));
/// assert_eq!(calculate_delay(base, 2, 3), Duration::from_millis(60));
/// ```
pub fn calculate_delay(delay: Duration, factor: u32, attempt: u32) -> Duration {
    delay.saturating_mul(factor).saturating_mul(attempt)
}
