use std::fmt;
use std::future::Future;
use std::time::Duration;

use super::{RetryOptions, retry};
use crate::error::IsRetryable;

pub const QUERY_DEFAULT_MAX_DELAY: Duration = Duration::from_millis(5000);

/// `(data, error)` pair produced by query-style clients that report failure in-band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult<T, E> {
    pub data: Option<T>,
    pub error: Option<E>,
}

impl<T, E> QueryResult<T, E> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: E) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn into_result(self) -> Result<Option<T>, E> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }
}

impl<T, E: fmt::Display> fmt::Display for QueryResult<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => write!(f, "{error}"),
            None => f.write_str("no error"),
        }
    }
}

/// Defaults for [`retry_query`]: 3 retries, 1000 ms initial delay, 5000 ms cap.
pub fn query_options<E: 'static>() -> RetryOptions<E> {
    RetryOptions::default().with_max_delay(QUERY_DEFAULT_MAX_DELAY)
}

/// Retries a query-style operation while its error classifies as retryable.
///
/// A pair without an error, or whose error is terminal, is returned as-is after a single
/// attempt. Once the retry budget is spent the last pair is returned; nothing is raised.
/// `options.should_retry` can further narrow which retryable errors are retried.
pub async fn retry_query<T, E, F, Fut>(
    mut operation: F,
    options: &RetryOptions<E>,
) -> QueryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = QueryResult<T, E>>,
    E: IsRetryable + fmt::Display + 'static,
    T: 'static,
{
    let should_retry = options.predicate();
    let pair_options: RetryOptions<QueryResult<T, E>> = RetryOptions::default()
        .with_max_retries(options.max_retries)
        .with_initial_delay(options.initial_delay)
        .with_max_delay(options.max_delay)
        .with_max_jitter(options.max_jitter)
        .with_should_retry(move |pair: &QueryResult<T, E>| {
            pair.error.as_ref().is_some_and(|error| should_retry(error))
        });

    let outcome = retry(
        || {
            let pending = operation();
            async move {
                let pair = pending.await;
                let retryable = pair.error.as_ref().is_some_and(|error| error.is_retryable());
                if retryable { Err(pair) } else { Ok(pair) }
            }
        },
        &pair_options,
    )
    .await;

    match outcome {
        Ok(pair) | Err(pair) => pair,
    }
}
