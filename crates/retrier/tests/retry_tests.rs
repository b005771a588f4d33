//! Integration tests for the public retry API
//!
//! Tests cover:
//! - The default `retry` entry point
//! - Executors built from a deserialized `RetryPolicy`
//! - Deadline tokens created with `with_timeout`
//! - Logging through `TracingObserver` during a real execution

use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use retrier::retry::{with_timeout, StatsObserver, TracingObserver};
use retrier::{retry, CancellationToken, Error, RetryExecutorBuilder, RetryPolicy};
use tokio::time::Instant;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("retrier=debug")
        .with_test_writer()
        .try_init();
}

#[tokio::test(start_paused = true)]
async fn test_default_retry_gives_up_after_ten_attempts() {
    let token = CancellationToken::new();
    let calls = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let result: Result<(), io::Error> = retry(&token, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")) }
    })
    .await;

    assert_eq!(result.unwrap_err().kind(), io::ErrorKind::ConnectionRefused);
    assert_eq!(calls.load(Ordering::SeqCst), 10);
    // 100ms * (1 + 2 + ... + 9)
    assert!(start.elapsed() >= Duration::from_millis(4500));
    assert!(start.elapsed() < Duration::from_millis(4600));
}

#[tokio::test(start_paused = true)]
async fn test_executor_from_yaml_policy() {
    let policy: RetryPolicy =
        serde_yaml_ng::from_str("max-attempts: 3\ndelay-ms: 20\ndelay-factor: 2\n").unwrap();
    let observer = Arc::new(StatsObserver::new());
    let token = CancellationToken::new();
    let start = Instant::now();

    let executor = RetryExecutorBuilder::<io::Error>::new()
        .with_policy(&policy)
        .with_observer(observer.clone())
        .build()
        .unwrap();

    let result: Result<(), io::Error> = executor
        .execute(&token, || async { Err(io::Error::other("unavailable")) })
        .await;

    assert!(result.is_err());
    assert_eq!(observer.attempt_starts(), 3);
    assert_eq!(observer.exhaustions(), 1);
    // 40ms + 80ms
    assert!(start.elapsed() >= Duration::from_millis(120));
    assert!(start.elapsed() < Duration::from_millis(130));
}

#[test]
fn test_zero_attempt_policy_is_rejected() {
    let policy: RetryPolicy = serde_json::from_str(r#"{"max-attempts": 0}"#).unwrap();

    let result = RetryExecutorBuilder::<io::Error>::new()
        .with_policy(&policy)
        .build();

    assert_eq!(result.err(), Some(Error::ZeroMaxAttempts));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_interrupts_backoff() {
    let root = CancellationToken::new();
    let deadline = with_timeout(&root, Duration::from_millis(250));
    let calls = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let result: Result<(), io::Error> = RetryExecutorBuilder::<io::Error>::new()
        .build()
        .unwrap()
        .execute(&deadline, || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Err(io::Error::other(format!("failure {}", call))) }
        })
        .await;

    // Waits of 100ms then 200ms; the deadline lands inside the second one
    assert_eq!(result.unwrap_err().to_string(), "failure 2");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(start.elapsed() >= Duration::from_millis(250));
    assert!(start.elapsed() < Duration::from_millis(300));
    assert!(!root.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_tracing_observer_during_execution() {
    init_tracing();
    let token = CancellationToken::new();
    let calls = Arc::new(AtomicU32::new(0));

    let result = RetryExecutorBuilder::<io::Error>::new()
        .with_delay(Duration::from_millis(5))
        .with_observer(TracingObserver::new("fetch-manifest"))
        .build()
        .unwrap()
        .execute(&token, || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if call < 3 {
                    Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"))
                } else {
                    Ok("manifest")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "manifest");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_stop_on_terminal_error_kind() {
    let token = CancellationToken::new();
    let calls = Arc::new(AtomicU32::new(0));

    let result: Result<(), io::Error> = RetryExecutorBuilder::<io::Error>::new()
        .with_stop_retry_if(|_, err| {
            matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
            )
        })
        .build()
        .unwrap()
        .execute(&token, || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if call == 1 {
                    Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"))
                } else {
                    Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
                }
            }
        })
        .await;

    assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
