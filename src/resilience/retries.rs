//! Retry policy for status page fetches.
//!
//! # Responsibilities
//! - Decide how many attempts a fetch gets (`1 + retry_count`)
//! - Produce the delay before each retry (see `backoff.rs`)
//! - Bound the worst-case latency of one probe
//!
//! Which failures are retried is decided by `FetchError::is_transient`:
//! connection errors, timeouts and 5xx responses are; DNS failures, 4xx
//! responses and undecodable bodies are not.

use std::time::Duration;

use crate::config::ClientConfig;
use crate::resilience::backoff::calculate_backoff;

/// Bounded retry schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one.
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms,
            max_delay_ms,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.retry_count, config.backoff_base_ms, config.backoff_max_ms)
    }

    /// Total number of attempts, the first included.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay to wait before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        calculate_backoff(retry, self.base_delay_ms, self.max_delay_ms)
    }

    /// Upper bound on one fetch: every attempt times out and every retry
    /// waits the maximum jittered backoff.
    pub fn worst_case_latency(&self, attempt_timeout: Duration) -> Duration {
        let attempts = attempt_timeout.saturating_mul(self.max_attempts());
        let backoff_ms: u64 = (1..=self.max_retries)
            .map(|retry| {
                let exp = 2u64.saturating_pow(retry - 1);
                self.base_delay_ms.saturating_mul(exp).min(self.max_delay_ms)
            })
            .map(|ms| ms.saturating_add(ms / 10).min(self.max_delay_ms))
            .fold(0u64, u64::saturating_add);
        attempts.saturating_add(Duration::from_millis(backoff_ms))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_count() {
        assert_eq!(RetryPolicy::new(0, 100, 2000).max_attempts(), 1);
        assert_eq!(RetryPolicy::new(3, 100, 2000).max_attempts(), 4);
        assert_eq!(RetryPolicy::new(u32::MAX, 1, 1).max_attempts(), u32::MAX);
    }

    #[test]
    fn test_delays_are_bounded() {
        let policy = RetryPolicy::new(8, 100, 500);
        for retry in 1..=8 {
            assert!(policy.delay_for(retry) <= Duration::from_millis(500));
        }
    }

    #[test]
    fn test_worst_case_latency() {
        // 4 attempts x 10s + backoffs 100, 200, 400 (each + 10%)
        let policy = RetryPolicy::new(3, 100, 2000);
        assert_eq!(
            policy.worst_case_latency(Duration::from_secs(10)),
            Duration::from_millis(40_000 + 110 + 220 + 440)
        );

        let no_retries = RetryPolicy::new(0, 100, 2000);
        assert_eq!(
            no_retries.worst_case_latency(Duration::from_secs(5)),
            Duration::from_secs(5)
        );
    }
}
