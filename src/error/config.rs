use thiserror::Error as ThisError;

use crate::retry::InvalidRetryOptions;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to extract configuration: {0}")]
    Extract(#[from] figment::Error),

    #[error("STRIPE_SECRET_KEY must be set and non-empty")]
    MissingSecretKey,

    #[error("payments.default_currency must be a three-letter currency code, got {0:?}")]
    InvalidCurrency(String),

    #[error("invalid retry settings: {0}")]
    InvalidRetry(#[from] InvalidRetryOptions),
}
