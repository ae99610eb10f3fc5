//! Bounded retries for remote calls.
//!
//! [`RetryPolicy`] re-runs an async operation while it fails with a
//! retryable error, sleeping a fixed delay between attempts. Non-retryable
//! errors surface on the first occurrence; after the last attempt the final
//! error is returned unmodified.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::config::retry::RetryConfig;
use crate::port::{TradingError, TransportError};

/// Errors that can tell whether a retry is worthwhile.
pub trait Transient {
    /// True for temporary connectivity problems.
    fn is_transient(&self) -> bool;
}

impl Transient for TradingError {
    fn is_transient(&self) -> bool {
        TradingError::is_transient(self)
    }
}

impl Transient for TransportError {
    fn is_transient(&self) -> bool {
        TransportError::is_transient(self)
    }
}

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

/// Bookkeeping for one retried call.
#[derive(Debug, Clone, Copy)]
struct RetryAttempt<'a> {
    operation: &'a str,
    attempt: u32,
    max_attempts: u32,
}

impl RetryAttempt<'_> {
    fn exhausted(&self) -> bool {
        self.attempt >= self.max_attempts
    }
}

impl Default for RetryPolicy {
    /// Five attempts, four seconds apart.
    fn default() -> Self {
        Self::new(5, Duration::from_secs(4))
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, config.delay())
    }
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` counts the first call and is at least 1.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `op`, retrying errors that report themselves as [`Transient`].
    pub async fn run<T, E, F, Fut>(&self, operation: &str, op: F) -> Result<T, E>
    where
        E: Transient + Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run_if(operation, E::is_transient, op).await
    }

    /// Run `op`, retrying errors accepted by `retryable`.
    pub async fn run_if<T, E, F, Fut, P>(
        &self,
        operation: &str,
        retryable: P,
        mut op: F,
    ) -> Result<T, E>
    where
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        let mut attempt = RetryAttempt {
            operation,
            attempt: 1,
            max_attempts: self.max_attempts,
        };

        loop {
            match op().await {
                Ok(value) => {
                    if attempt.attempt > 1 {
                        debug!(
                            operation = attempt.operation,
                            attempt = attempt.attempt,
                            "Retried call succeeded"
                        );
                    }
                    return Ok(value);
                }
                Err(e) if !retryable(&e) => return Err(e),
                Err(e) if attempt.exhausted() => {
                    warn!(
                        operation = attempt.operation,
                        attempts = attempt.attempt,
                        error = %e,
                        "Giving up after transient failures"
                    );
                    return Err(e);
                }
                Err(e) => {
                    warn!(
                        operation = attempt.operation,
                        attempt = attempt.attempt,
                        max_attempts = attempt.max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %e,
                        "Transient failure, retrying"
                    );
                    sleep(self.delay).await;
                    attempt.attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(5, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn succeeds_on_fifth_attempt_after_four_transient_failures() {
        let calls = AtomicU32::new(0);

        let result = fast_policy()
            .run("balance", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 5 {
                    Err(TradingError::Network(format!("timeout {n}")))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result, Ok(5));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn returns_fifth_error_after_five_transient_failures() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = fast_policy()
            .run("balance", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Err(TradingError::Network(format!("timeout {n}")))
            })
            .await;

        assert_eq!(result, Err(TradingError::Network("timeout 5".to_string())));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn non_retryable_error_is_raised_immediately() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = fast_policy()
            .run("balance", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TradingError::MissingMarketData {
                    symbol: "DOGE".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(TradingError::MissingMarketData { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn custom_predicate_decides_retries() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = fast_policy()
            .run_if(
                "custom",
                |e: &String| e.starts_with("retry"),
                || async {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    if n == 0 {
                        Err("retry me".to_string())
                    } else {
                        Err("fatal".to_string())
                    }
                },
            )
            .await;

        assert_eq!(result, Err("fatal".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_configured_delay_between_attempts() {
        let policy = RetryPolicy::default();
        let started = tokio::time::Instant::now();

        let _: Result<(), _> = policy
            .run("send", || async {
                Err(TransportError::Network("reset".to_string()))
            })
            .await;

        assert_eq!(started.elapsed(), Duration::from_secs(16));
    }

    #[test]
    fn zero_attempts_is_clamped_to_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
        assert_eq!(RetryPolicy::none().max_attempts(), 1);
    }

    #[test]
    fn api_errors_are_not_transient() {
        assert!(!TransportError::Api("bad request".into()).is_transient());
        assert!(TransportError::Network("reset".into()).is_transient());
        assert!(!TradingError::Exchange("rejected".into()).is_transient());
    }
}
