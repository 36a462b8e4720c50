//! Exponential backoff with jitter.

use std::time::Duration;
use rand::Rng;

/// Delay before retry number `attempt` (1-based): `base_ms * 2^(attempt-1)`
/// plus up to 10% jitter.
///
/// The cap applies twice. The exponential term is clamped to `max_ms` before
/// jitter so the jitter range stays bounded, and the jittered sum is clamped
/// again so `max_ms` is a hard ceiling on every delay. The sequence is
/// therefore non-decreasing up to the cap and flat after it, which is what
/// `RetryPolicy::worst_case_latency` relies on.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay.saturating_add(jitter).min(max_ms))
}
