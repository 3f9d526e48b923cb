use std::time::Duration;
use tokio::time::sleep;

// ============================================================================
// Exponential Backoff Retry Strategy
// ============================================================================
//
// Retry wrapper for fallible collaborator calls. Only errors the caller
// marks as transient are retried; the operation itself must be idempotent
// (checkout retries order saves keyed by the order id).
//
// ============================================================================

#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Cap on the delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Single attempt, no retries. Used by tests that assert on failures.
    pub fn no_retries() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Classifies errors into retryable and permanent.
pub trait IsTransient {
    fn is_transient(&self) -> bool;
}

/// Outcome of a retried operation.
#[derive(Debug)]
pub enum RetryResult<T, E> {
    /// Operation succeeded
    Success(T),
    /// Transient failures exhausted the attempt budget
    Failed(E),
    /// Permanent failure, retrying would not help
    PermanentFailure(E),
}

/// Run `operation` with exponential backoff, retrying transient errors up to
/// the configured attempt budget.
pub async fn retry_on_transient<F, Fut, T, E>(
    config: RetryConfig,
    mut operation: F,
) -> RetryResult<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display + IsTransient,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        attempt += 1;

        match operation(attempt).await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempt, "operation succeeded after retry");
                }
                return RetryResult::Success(result);
            }
            Err(error) => {
                if !error.is_transient() {
                    tracing::error!(error = %error, "permanent failure, not retrying");
                    return RetryResult::PermanentFailure(error);
                }

                if attempt >= config.max_attempts {
                    tracing::error!(attempt, error = %error, "giving up after all retries");
                    return RetryResult::Failed(error);
                }

                tracing::warn!(
                    attempt,
                    error = %error,
                    delay_ms = delay.as_millis(),
                    "transient failure, retrying after delay"
                );

                sleep(delay).await;

                delay = Duration::from_millis(
                    ((delay.as_millis() as f64) * config.multiplier) as u64,
                )
                .min(config.max_delay);
            }
        }
    }
}
