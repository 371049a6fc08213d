//! Retrying operations rejected by the service's rate limit.

use crate::error::SyncError;
use boardlink_model::RecordError;
use boardlink_types::RemoteError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// How often and how long to wait when the service reports an exhausted
/// budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    /// Wait used when the error does not say how long to back off.
    pub fallback_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            fallback_delay_ms: 1000,
        }
    }
}

impl RetryPolicy {
    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}

/// Errors that can tell whether they came from a rate limit.
pub trait RateLimited {
    fn is_rate_limited(&self) -> bool;

    /// The back-off the service asked for, if it named one.
    fn retry_after(&self) -> Option<Duration>;
}

impl RateLimited for RemoteError {
    fn is_rate_limited(&self) -> bool {
        RemoteError::is_rate_limited(self)
    }

    fn retry_after(&self) -> Option<Duration> {
        RemoteError::retry_after(self)
    }
}

impl RateLimited for RecordError {
    fn is_rate_limited(&self) -> bool {
        matches!(self, RecordError::Remote(e) if e.is_rate_limited())
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            RecordError::Remote(e) => e.retry_after(),
            _ => None,
        }
    }
}

impl RateLimited for SyncError {
    fn is_rate_limited(&self) -> bool {
        self.remote().is_some_and(RemoteError::is_rate_limited)
    }

    fn retry_after(&self) -> Option<Duration> {
        self.remote().and_then(RemoteError::retry_after)
    }
}

/// Runs `op`, running it again after a pause while it fails on the rate
/// limit. Any other error, or the last rate-limit error once attempts run
/// out, is returned as is.
pub async fn retry_when_rate_limited<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    E: RateLimited + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_rate_limited() && attempt < max_attempts => {
                let delay = err.retry_after().unwrap_or_else(|| policy.fallback_delay());
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "rate limited, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
