//! Exponential backoff with additive jitter for throttled calls.

use std::time::Duration;

use async_trait::async_trait;

/// How many times a throttled call is attempted, and how long to wait
/// between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Delay unit that the exponent multiplies. One second in production.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Delay after the failed attempt with index `attempt` (0-based):
    /// `base * (2^attempt + jitter)`, `jitter` in `[0, 1)`.
    pub fn delay_for(&self, attempt: u32, jitter: f64) -> Duration {
        let jitter = jitter.clamp(0.0, 1.0 - f64::EPSILON);
        let factor = 2f64.powi(attempt.min(30) as i32) + jitter;
        self.base_delay.mul_f64(factor)
    }

    /// Same as [`Self::delay_for`] with a freshly drawn jitter.
    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        self.delay_for(attempt, rand::random::<f64>())
    }

    /// Upper bound on the total time spent sleeping when every attempt is
    /// throttled. No sleep follows the final attempt.
    pub fn worst_case_total_delay(&self) -> Duration {
        (0..self.max_attempts.saturating_sub(1))
            .map(|attempt| self.delay_for(attempt, 1.0))
            .sum()
    }
}

/// Waits between attempts. Separate from the policy so tests can record
/// delays instead of sleeping.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
