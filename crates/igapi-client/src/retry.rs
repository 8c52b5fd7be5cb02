use std::time::Duration;

/// Delay before re-issuing a call that failed with a retryable error.
///
/// The client itself never retries; this is for callers that do.
/// The delay is `base * 2^attempt`, saturating instead of overflowing.
///
/// ```
/// use std::time::Duration;
/// use igapi_client::backoff_delay;
///
/// assert_eq!(backoff_delay(0, Duration::from_secs(2)), Duration::from_secs(2));
/// assert_eq!(backoff_delay(3, Duration::from_secs(2)), Duration::from_secs(16));
/// ```
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(attempt);
    base.saturating_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_each_attempt() {
        let base = Duration::from_millis(250);
        let delays: Vec<Duration> = (0..5).map(|i| backoff_delay(i, base)).collect();
        for i in 1..delays.len() {
            assert_eq!(delays[i], delays[i - 1] * 2);
        }
    }

    #[test]
    fn zero_base_stays_zero() {
        assert_eq!(backoff_delay(10, Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn saturates() {
        let delay = backoff_delay(64, Duration::from_secs(u64::MAX / 2));
        assert_eq!(delay, Duration::MAX);
    }
}
