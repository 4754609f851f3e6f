//! Retry with randomized exponential backoff for LLM calls.
//!
//! The delay before retry `n` (0-based) is drawn uniformly from
//! `[0, min(max_delay, multiplier * 2^n)]`. Only errors whose
//! [`ErrorCode::retryable`] is true are retried; credential failures never are.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use super::types::LlmError;
use crate::error::ErrorCode;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_MULTIPLIER: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Values below 1 act as 1.
    pub max_attempts: u32,
    pub multiplier: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS, multiplier: DEFAULT_MULTIPLIER, max_delay: DEFAULT_MAX_DELAY }
    }
}

impl RetryPolicy {
    /// Upper bound of the randomized delay before retry `retry` (0-based).
    #[must_use]
    pub fn delay_ceiling(&self, retry: u32) -> Duration {
        let factor = 2_u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.multiplier
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    /// Random delay in `[0, delay_ceiling(retry)]`.
    #[must_use]
    pub fn jittered_delay(&self, retry: u32) -> Duration {
        let ceiling = self.delay_ceiling(retry);
        if ceiling.is_zero() {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(rand::rng().random_range(0.0..=ceiling.as_secs_f64()))
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// attempt budget is spent. The last error is returned.
///
/// # Errors
///
/// Returns the first non-retryable error, or the final retryable one.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_auth_failure() || !err.retryable() || attempt >= max_attempts => return Err(err),
            Err(err) => {
                let delay = policy.jittered_delay(attempt - 1);
                warn!(
                    attempt,
                    max_attempts,
                    code = err.error_code(),
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "llm: transient failure; retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;
