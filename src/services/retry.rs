//! Retry controller with exponential backoff.
//!
//! Wraps a single scorer invocation: transient failures are retried up to
//! the policy's budget with exponentially growing delays, permanent
//! failures fail immediately, and an exhausted budget surfaces as
//! [`EvaluationError::RetriesExhausted`] carrying the last underlying
//! error. A failure is never converted into a default score.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::error::{EvaluationError, ScorerError};
use crate::domain::models::RetryConfig;

/// Retry policy with exponential backoff.
///
/// Backoff for attempt `n` (0-based) is `base_delay * 2^n`, capped at
/// `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt budget for one invocation
    max_retries: u32,
    /// Initial backoff duration
    base_delay: Duration,
    /// Upper bound on any single backoff
    max_delay: Duration,
}

impl RetryPolicy {
    /// Create a new retry policy.
    ///
    /// # Panics
    /// Panics if `max_delay` is smaller than `base_delay`.
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        assert!(
            max_delay >= base_delay,
            "max_delay must be >= base_delay"
        );
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Execute an operation, retrying transient failures.
    ///
    /// The operation is attempted at most `max_retries` times in total
    /// (a budget of 0 still performs one attempt). A permanent
    /// [`ScorerError`] returns immediately with zero retries performed.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, EvaluationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ScorerError>>,
    {
        let mut attempt = 0u32;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!("Operation succeeded after {} retries", attempt);
                    }
                    return Ok(result);
                }
                Err(err) if !err.is_transient() => {
                    debug!("Permanent error, not retrying: {}", err);
                    return Err(EvaluationError::Scorer(err));
                }
                Err(err) if attempt + 1 >= self.max_retries => {
                    let attempts = attempt + 1;
                    warn!("Operation failed after {} attempts: {}", attempts, err);
                    return Err(EvaluationError::RetriesExhausted { attempts, source: err });
                }
                Err(err) => {
                    let backoff = self.calculate_backoff(attempt);
                    warn!(
                        "Attempt {} failed with transient error: {}. Retrying in {:?}...",
                        attempt + 1,
                        err,
                        backoff
                    );
                    sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Backoff for a 0-based attempt: `min(base * 2^attempt, max)`.
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let backoff_ms = base_ms
            .saturating_mul(2_u64.saturating_pow(attempt))
            .min(u64::try_from(self.max_delay.as_millis()).unwrap_or(u64::MAX));
        Duration::from_millis(backoff_ms)
    }
}

impl Default for RetryPolicy {
    /// Recommended defaults: 3 attempts, 1s initial backoff, 5min cap.
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1), Duration::from_secs(300))
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_millis(config.base_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }
}
