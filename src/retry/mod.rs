//! Exponential-backoff retry executor.
//!
//! [`retry`] drives a fallible async operation to completion, sleeping between attempts;
//! [`retry_query`] does the same for operations that report failure in a
//! [`QueryResult`] instead of an `Err`.

mod backoff;
mod classify;
mod options;
mod query;

pub use backoff::{JitteredBackoff, JitteredBackoffBuilder, backoff_delay};
pub use classify::{ErrorCode, RetryVerdict, classify};
pub use options::{
    DEFAULT_INITIAL_DELAY, DEFAULT_MAX_DELAY, DEFAULT_MAX_JITTER, DEFAULT_MAX_RETRIES,
    InvalidRetryOptions, RetryOptions,
};
pub use query::{QUERY_DEFAULT_MAX_DELAY, QueryResult, query_options, retry_query};

use backon::Retryable;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Runs `operation` until it succeeds, the predicate rejects the error, or `max_retries`
/// retries have been spent.
///
/// The error returned is always the one produced by the last attempt.
pub async fn retry<T, E, F, Fut>(operation: F, options: &RetryOptions<E>) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let max_retries = options.max_retries;
    let mut attempt: u32 = 0;
    operation
        .retry(options.backoff())
        .sleep(tokio::time::sleep)
        .when(|err: &E| options.should_retry(err))
        .notify(|err: &E, delay: Duration| {
            attempt += 1;
            warn!(
                attempt,
                max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "Attempt {} failed, retrying in {:?}",
                attempt,
                delay
            );
        })
        .await
}
