use reqwest::StatusCode;
use thiserror::Error as ThisError;

use super::IsRetryable;
use crate::retry::{ErrorCode, RetryVerdict, classify};

/// Failures talking to the payment processor.
#[derive(Debug, ThisError)]
pub enum GatewayError {
    /// Transport-level failure (DNS, connect, timeouts, body decode).
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer from the processor.
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },

    #[error("Upstream payment intent {0} has no client secret")]
    MissingClientSecret(String),

    #[error("Invalid payments endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl GatewayError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Upstream { status, .. } => Some(*status),
            GatewayError::Transport(error) => error.status(),
            _ => None,
        }
    }
}

impl IsRetryable for GatewayError {
    fn verdict(&self) -> RetryVerdict {
        match self {
            GatewayError::Transport(error) if error.is_connect() => RetryVerdict::Retryable,
            GatewayError::Transport(error) => error.verdict(),
            // The processor asks clients to back off and retry on 429 as well.
            GatewayError::Upstream { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS => {
                RetryVerdict::Retryable
            }
            GatewayError::Upstream { status, .. } => classify(&ErrorCode::Status(status.as_u16())),
            GatewayError::MissingClientSecret(_) | GatewayError::InvalidEndpoint(_) => {
                RetryVerdict::Terminal
            }
        }
    }
}
