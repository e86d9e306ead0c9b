//! Bounded-attempt retry with exponential backoff.
//!
//! A single policy is applied per operation: retry only while the error is
//! classified retryable and attempts remain, then surface the last
//! classified error. Create uses [`RetryPolicy::none`]: resubmitting a stop
//! order on an ambiguous failure risks duplicate protective orders.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::StoplossError;

/// Default bounded retry count for exchange calls.
pub const DEFAULT_RETRY_COUNT: u32 = 4;

/// Retry count for the order-fetch path, which tolerates a little more
/// exchange lag than the default.
pub const FETCH_ORDER_RETRY_COUNT: u32 = 5;

/// Retry policy for a single operation.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Zero means a single attempt.
    pub max_retries: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Cap on the backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential growth.
    pub multiplier: f64,
    /// Jitter factor applied to each delay (0.2 = ±20%).
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_RETRY_COUNT,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
            jitter_factor: 0.2,
        }
    }
}

impl RetryPolicy {
    /// Policy with no retries: one attempt, surface whatever it returns.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Default policy for the order-fetch path.
    #[must_use]
    pub fn fetch_order() -> Self {
        Self {
            max_retries: FETCH_ORDER_RETRY_COUNT,
            ..Self::default()
        }
    }

    /// Override the retry count.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Override the initial backoff.
    #[must_use]
    pub const fn with_initial_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }
}

/// Exponential backoff calculator for one operation's retry loop.
#[derive(Debug)]
struct ExponentialBackoff {
    remaining: u32,
    current: Duration,
    max: Duration,
    multiplier: f64,
    jitter_factor: f64,
}

impl ExponentialBackoff {
    fn new(policy: &RetryPolicy) -> Self {
        Self {
            remaining: policy.max_retries,
            current: policy.initial_backoff,
            max: policy.max_backoff,
            multiplier: policy.multiplier,
            jitter_factor: policy.jitter_factor,
        }
    }

    /// Next delay, or `None` once the retry budget is spent.
    fn next_backoff(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let base = self.current;
        self.current = Duration::from_secs_f64(
            (self.current.as_secs_f64() * self.multiplier).min(self.max.as_secs_f64()),
        );

        Some(Self::apply_jitter(base, self.jitter_factor))
    }

    fn apply_jitter(base: Duration, factor: f64) -> Duration {
        if factor <= 0.0 {
            return base;
        }
        let base_s = base.as_secs_f64();
        let spread = base_s * factor;
        let jittered = rand::rng().random_range((base_s - spread).max(0.0)..=base_s + spread);
        Duration::from_secs_f64(jittered)
    }
}

/// Run `call` under `policy`, retrying retryable failures with backoff.
///
/// The last classified error is surfaced once the retry budget is spent;
/// fatal kinds are surfaced immediately.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut call: F,
) -> Result<T, StoplossError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoplossError>>,
{
    let mut backoff = ExponentialBackoff::new(policy);

    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() => {
                let Some(delay) = backoff.next_backoff() else {
                    return Err(err);
                };
                tracing::warn!(
                    operation,
                    error = %err,
                    delay_ms = delay.as_millis(),
                    "retryable failure, backing off"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
