use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::retry::{DEFAULT_MAX_JITTER, RetryOptions};

/// Retry bounds for payment processor calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    /// TOML: `retry.max_retries`. Default: `3`.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// TOML: `retry.initial_delay_ms`. Default: `1000`.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Cap applied after jitter.
    /// TOML: `retry.max_delay_ms`. Default: `10000`.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Upper bound of the random additive jitter; `0` disables it.
    /// TOML: `retry.max_jitter_ms`. Default: `1000`.
    #[serde(default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,
}

impl RetryConfig {
    /// Options with these bounds and the always-retry predicate.
    pub fn to_options<E: 'static>(&self) -> RetryOptions<E> {
        RetryOptions::default()
            .with_max_retries(self.max_retries)
            .with_initial_delay(Duration::from_millis(self.initial_delay_ms))
            .with_max_delay(Duration::from_millis(self.max_delay_ms))
            .with_max_jitter(Duration::from_millis(self.max_jitter_ms))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            max_jitter_ms: default_max_jitter_ms(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_max_jitter_ms() -> u64 {
    DEFAULT_MAX_JITTER.as_millis() as u64
}
