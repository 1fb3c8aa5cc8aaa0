//! Bounded exponential backoff with jitter for reconnect attempts.

use std::time::Duration;

use rand::Rng;

/// Attempts beyond this no longer grow the delay; avoids a useless
/// (and overflowing) shift for long outages.
const MAX_EXPONENT: u32 = 16;

/// The deterministic delay ceiling for a reconnect attempt.
///
/// Attempt 1 waits `base`, attempt 2 waits `2 * base`, and so on, capped
/// at `max`.
pub(crate) fn ceiling(attempt: u32, base: Duration, max: Duration) -> Duration {
    let exponent = attempt.saturating_sub(1).min(MAX_EXPONENT);
    let factor = 2u32.saturating_pow(exponent);
    base.saturating_mul(factor).min(max)
}

/// Pick the actual delay for an attempt: uniformly random between half
/// the ceiling and the full ceiling, so a burst of disconnected clients
/// does not reconnect in lockstep.
pub(crate) fn delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    let ceiling_ms = u64::try_from(ceiling(attempt, base, max).as_millis()).unwrap_or(u64::MAX);
    let floor_ms = ceiling_ms / 2;
    let jittered = rand::rng().random_range(floor_ms..=ceiling_ms);
    Duration::from_millis(jittered)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Duration = Duration::from_secs(1);
    const MAX: Duration = Duration::from_secs(30);

    #[test]
    fn ceiling_doubles_per_attempt() {
        assert_eq!(ceiling(1, BASE, MAX), Duration::from_secs(1));
        assert_eq!(ceiling(2, BASE, MAX), Duration::from_secs(2));
        assert_eq!(ceiling(3, BASE, MAX), Duration::from_secs(4));
        assert_eq!(ceiling(5, BASE, MAX), Duration::from_secs(16));
    }

    #[test]
    fn ceiling_is_capped() {
        assert_eq!(ceiling(6, BASE, MAX), MAX);
        assert_eq!(ceiling(60, BASE, MAX), MAX);
        assert_eq!(ceiling(u32::MAX, BASE, MAX), MAX);
    }

    #[test]
    fn delay_stays_within_the_jitter_window() {
        for attempt in 1..8 {
            let picked = delay(attempt, BASE, MAX);
            let cap = ceiling(attempt, BASE, MAX);
            assert!(picked <= cap);
            assert!(picked >= cap / 2);
        }
    }
}
