//! Retry policy as it appears in caller configuration files

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::retry::{DEFAULT_DELAY, DEFAULT_DELAY_FACTOR, DEFAULT_MAX_ATTEMPTS};

/// Retry policy for an operation
///
/// Every field is optional when deserializing; missing fields fall back to
/// the executor defaults (10 attempts, 100ms delay, factor 1).
///
/// ```yaml
/// max-attempts: 5
/// delay-ms: 250
/// delay-factor: 2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay between attempts in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Multiplier applied to the base delay on every attempt
    #[serde(default = "default_delay_factor")]
    pub delay_factor: u32,
}

impl RetryPolicy {
    /// Base delay as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
            delay_factor: default_delay_factor(),
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}
fn default_delay_ms() -> u64 {
    DEFAULT_DELAY.as_millis() as u64
}
fn default_delay_factor() -> u32 {
    DEFAULT_DELAY_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.delay(), Duration::from_millis(100));
        assert_eq!(policy.delay_factor, 1);
    }

    #[test]
    fn test_deserialize_yaml_kebab_case() {
        let yaml = "max-attempts: 5\ndelay-ms: 250\ndelay-factor: 2\n";
        let policy: RetryPolicy = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay(), Duration::from_millis(250));
        assert_eq!(policy.delay_factor, 2);
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let policy: RetryPolicy = serde_json::from_str(r#"{"max-attempts": 3}"#).unwrap();

        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_ms, 100);
        assert_eq!(policy.delay_factor, 1);
    }

    #[test]
    fn test_negative_factor_rejected() {
        let result: Result<RetryPolicy, _> = serde_json::from_str(r#"{"delay-factor": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_kebab_case() {
        let json = serde_json::to_string(&RetryPolicy::default()).unwrap();
        assert!(json.contains("\"max-attempts\":10"));
        assert!(json.contains("\"delay-ms\":100"));
        assert!(json.contains("\"delay-factor\":1"));
    }
}
