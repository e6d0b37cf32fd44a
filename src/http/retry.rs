//! Fixed-delay retry around fallible async operations.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::FetchError;

/// Retry policy: a fixed number of re-attempts with a constant delay.
///
/// There is no backoff and no jitter. The constant-delay policy is kept
/// as-is on purpose; changing it is a behavior change, not a cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Re-attempts after the initial one.
    pub max_retries: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Total attempts including the initial one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// Run `op`, re-attempting retryable failures under `policy`.
///
/// Unretryable errors propagate immediately. The delay elapses after
/// every failed attempt except the final one; when all attempts fail,
/// the final error is wrapped in [`FetchError::RetriesExhausted`].
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let attempts = policy.max_attempts();

    for attempt in 1..attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() => {
                warn!(attempt, max = attempts, error = %err, "fetch attempt failed, retrying");
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => return Err(err),
        }
    }

    match op().await {
        Ok(value) => Ok(value),
        Err(err) if err.is_retryable() => Err(FetchError::RetriesExhausted {
            attempts,
            source: Box::new(err),
        }),
        Err(err) => Err(err),
    }
}
