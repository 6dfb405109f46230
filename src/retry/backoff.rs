use backon::BackoffBuilder;
use rand::Rng;
use std::time::Duration;

/// Exponential schedule with additive jitter applied before the cap, for `backon::Retryable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitteredBackoffBuilder {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub max_jitter: Duration,
}

/// Yields the delay before each retry; exhausted after `max_retries` items.
#[derive(Debug, Clone)]
pub struct JitteredBackoff {
    builder: JitteredBackoffBuilder,
    attempt: u32,
}

impl BackoffBuilder for JitteredBackoffBuilder {
    type Backoff = JitteredBackoff;

    fn build(self) -> Self::Backoff {
        JitteredBackoff {
            builder: self,
            attempt: 0,
        }
    }
}

impl Iterator for JitteredBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.attempt >= self.builder.max_retries {
            return None;
        }
        let delay = backoff_delay(
            self.attempt,
            self.builder.initial_delay,
            self.builder.max_delay,
            sample_jitter(self.builder.max_jitter),
        );
        self.attempt += 1;
        Some(delay)
    }
}

/// `min(initial * 2^attempt + jitter, max)`, saturating on overflow.
pub fn backoff_delay(attempt: u32, initial: Duration, max: Duration, jitter: Duration) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    initial
        .checked_mul(factor)
        .unwrap_or(Duration::MAX)
        .saturating_add(jitter)
        .min(max)
}

fn sample_jitter(max_jitter: Duration) -> Duration {
    let ceiling = u64::try_from(max_jitter.as_millis()).unwrap_or(u64::MAX);
    if ceiling == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..ceiling))
}
