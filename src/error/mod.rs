mod config;
mod gateway;
mod storefront;

pub use config::ConfigError;
pub use gateway::GatewayError;
pub use storefront::StorefrontError;

use crate::retry::RetryVerdict;

/// Errors that know whether another attempt could succeed.
pub trait IsRetryable {
    fn verdict(&self) -> RetryVerdict;

    fn is_retryable(&self) -> bool {
        self.verdict().is_retryable()
    }
}
