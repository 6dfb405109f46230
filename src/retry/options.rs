use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error as ThisError;

use super::backoff::JitteredBackoffBuilder;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(10_000);
/// Upper bound (exclusive) of the additive jitter term.
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(1000);

type ShouldRetry<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Bounds and predicate for one [`retry`](super::retry) invocation.
///
/// | field           | default  |
/// |-----------------|----------|
/// | `max_retries`   | 3        |
/// | `initial_delay` | 1000 ms  |
/// | `max_delay`     | 10000 ms |
/// | `max_jitter`    | 1000 ms  |
/// | `should_retry`  | always   |
///
/// `max_retries` counts retries, not attempts: the operation runs at most `max_retries + 1`
/// times.
pub struct RetryOptions<E> {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub max_jitter: Duration,
    should_retry: ShouldRetry<E>,
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum InvalidRetryOptions {
    #[error("initial delay {initial:?} exceeds max delay {max:?}")]
    InitialExceedsMax { initial: Duration, max: Duration },
}

impl<E: 'static> Default for RetryOptions<E> {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            max_jitter: DEFAULT_MAX_JITTER,
            should_retry: Arc::new(|_: &E| true),
        }
    }
}

impl<E> RetryOptions<E> {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// A zero jitter makes delays deterministic.
    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    pub fn with_should_retry<P>(mut self, should_retry: P) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.should_retry = Arc::new(should_retry);
        self
    }

    pub fn validate(&self) -> Result<(), InvalidRetryOptions> {
        if self.initial_delay > self.max_delay {
            return Err(InvalidRetryOptions::InitialExceedsMax {
                initial: self.initial_delay,
                max: self.max_delay,
            });
        }
        Ok(())
    }

    pub fn should_retry(&self, error: &E) -> bool {
        (self.should_retry)(error)
    }

    pub(crate) fn predicate(&self) -> ShouldRetry<E> {
        self.should_retry.clone()
    }

    /// Delay schedule for one invocation: at most `max_retries` delays.
    pub fn backoff(&self) -> JitteredBackoffBuilder {
        JitteredBackoffBuilder {
            max_retries: self.max_retries,
            initial_delay: self.initial_delay,
            max_delay: self.max_delay,
            max_jitter: self.max_jitter,
        }
    }
}

impl<E> Clone for RetryOptions<E> {
    fn clone(&self) -> Self {
        Self {
            max_retries: self.max_retries,
            initial_delay: self.initial_delay,
            max_delay: self.max_delay,
            max_jitter: self.max_jitter,
            should_retry: self.should_retry.clone(),
        }
    }
}

impl<E> fmt::Debug for RetryOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOptions")
            .field("max_retries", &self.max_retries)
            .field("initial_delay", &self.initial_delay)
            .field("max_delay", &self.max_delay)
            .field("max_jitter", &self.max_jitter)
            .finish_non_exhaustive()
    }
}
