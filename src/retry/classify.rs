use std::fmt;

use crate::error::IsRetryable;

/// Whether a failure is worth another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryVerdict {
    Retryable,
    Terminal,
}

impl RetryVerdict {
    pub fn is_retryable(self) -> bool {
        matches!(self, RetryVerdict::Retryable)
    }
}

/// Client-library-neutral description of what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    /// The request was aborted because it ran out of time.
    Timeout,
    /// The remote side answered with this HTTP-like status.
    Status(u16),
    /// Anything else, kept verbatim for logging.
    Other(String),
}

/// Timeouts and server-side (5xx) failures are transient; everything else is final.
pub fn classify(code: &ErrorCode) -> RetryVerdict {
    match code {
        ErrorCode::Timeout => RetryVerdict::Retryable,
        ErrorCode::Status(status) if *status >= 500 => RetryVerdict::Retryable,
        ErrorCode::Status(_) | ErrorCode::Other(_) => RetryVerdict::Terminal,
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Timeout => f.write_str("timeout"),
            ErrorCode::Status(status) => write!(f, "status {status}"),
            ErrorCode::Other(other) => f.write_str(other),
        }
    }
}

impl IsRetryable for ErrorCode {
    fn verdict(&self) -> RetryVerdict {
        classify(self)
    }
}

impl From<&reqwest::Error> for ErrorCode {
    fn from(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            ErrorCode::Timeout
        } else if let Some(status) = error.status() {
            ErrorCode::Status(status.as_u16())
        } else {
            ErrorCode::Other(error.to_string())
        }
    }
}

impl IsRetryable for reqwest::Error {
    fn verdict(&self) -> RetryVerdict {
        classify(&ErrorCode::from(self))
    }
}
