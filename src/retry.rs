//! Retry with backoff for rate-limited vendor APIs
//!
//! Only rate-limit failures are retried. Everything else, timeouts included,
//! goes straight back to the caller so retries never add load beyond what the
//! vendor asked us to wait for.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::FetchError;

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries (not including the initial attempt)
    pub max_retries: u32,

    /// Backoff grows as `(attempt + 1) * base_delay`
    pub base_delay: Duration,

    /// Hint assumed when the server gives no usable `Retry-After`
    pub fallback_retry_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(2000),
            fallback_retry_after: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Policy that gives up on the first failure.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Fallback backoff for a zero-based attempt number.
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt.saturating_add(1))
    }

    /// Wait before the retry following `attempt`: the larger of the retry hint
    /// and the backoff curve.
    pub fn wait_duration(&self, attempt: u32, decision: RetryDecision) -> Duration {
        let hint = match decision {
            RetryDecision::RetryAfter(hint) => hint,
            RetryDecision::Retry | RetryDecision::NoRetry => self.fallback_retry_after,
        };
        hint.max(self.backoff_duration(attempt))
    }
}

/// Retry classification for errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retryable, no server hint
    Retry,
    /// Retryable, server asked us to wait this long
    RetryAfter(Duration),
    /// Permanent for this call
    NoRetry,
}

/// Errors that know whether they are worth retrying.
pub trait RetryableError {
    fn retry_decision(&self) -> RetryDecision;
}

impl RetryableError for FetchError {
    fn retry_decision(&self) -> RetryDecision {
        match self {
            FetchError::RateLimited {
                retry_after: Some(hint),
                ..
            } => RetryDecision::RetryAfter(*hint),
            FetchError::RateLimited {
                retry_after: None, ..
            } => RetryDecision::Retry,
            _ => RetryDecision::NoRetry,
        }
    }
}

/// Execute an async operation, retrying on rate-limit errors.
///
/// The operation runs at most `policy.max_retries + 1` times. A non-retryable
/// error is returned from the attempt that produced it; when the budget runs
/// out the last rate-limit error is returned.
pub async fn with_backoff<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError + std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        let err = match operation().await {
            Ok(result) => return Ok(result),
            Err(err) => err,
        };

        let decision = err.retry_decision();
        if decision == RetryDecision::NoRetry {
            debug!(
                operation = operation_name,
                attempt = attempt,
                "Operation failed with non-retryable error: {}",
                err
            );
            return Err(err);
        }

        if attempt >= policy.max_retries {
            warn!(
                operation = operation_name,
                attempts = attempt + 1,
                "Giving up after {} attempts: {}",
                attempt + 1,
                err
            );
            return Err(err);
        }

        let wait = policy.wait_duration(attempt, decision);
        warn!(
            operation = operation_name,
            attempt = attempt + 1,
            max_attempts = policy.max_retries + 1,
            wait_ms = wait.as_millis() as u64,
            "Rate limited, retrying: {}",
            err
        );

        sleep(wait).await;
        attempt += 1;
    }
}
