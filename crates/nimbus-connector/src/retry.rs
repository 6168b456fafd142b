//! Exponential backoff retry for transient transport failures.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ConnectorResult;

/// Retry policy configuration.
///
/// Only transient errors (see [`ConnectorError::is_transient`]) are
/// retried; after the attempts are exhausted the last error is returned
/// unmodified.
///
/// [`ConnectorError::is_transient`]: crate::error::ConnectorError::is_transient
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (0 = no retries).
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Delay cap.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with the given max retries and base delay.
    /// The delay cap defaults to 30 seconds.
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: Duration::from_secs(30),
        }
    }

    /// Whether the error should be retried at the given attempt number.
    #[must_use]
    pub fn should_retry(&self, attempt: u32, error: &crate::error::ConnectorError) -> bool {
        attempt < self.max_retries && error.is_transient()
    }

    /// Delay for the given attempt: `min(base * 2^attempt, max_delay)`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponential = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        exponential.min(self.max_delay)
    }

    /// Execute an async operation with retry.
    ///
    /// The closure `f` is called repeatedly until it succeeds, a permanent
    /// error is encountered, or the maximum number of retries is exhausted.
    pub async fn execute<F, Fut, T>(&self, operation: &str, mut f: F) -> ConnectorResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ConnectorResult<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match f().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(
                            operation,
                            attempt = attempt + 1,
                            "operation succeeded after retries"
                        );
                    }
                    return Ok(value);
                }
                Err(error) => {
                    if !self.should_retry(attempt, &error) {
                        if attempt > 0 {
                            warn!(
                                operation,
                                attempts = attempt + 1,
                                error = %error,
                                "giving up after retries"
                            );
                        }
                        return Err(error);
                    }

                    let delay = self.delay_for(attempt);
                    debug!(
                        operation,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "retrying after transient error"
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
