pub mod config;
pub mod error;
pub mod payments;
pub mod retry;
pub mod server;

mod utils;

pub use error::{GatewayError, IsRetryable, StorefrontError};
pub use retry::{QueryResult, RetryOptions, retry, retry_query};
