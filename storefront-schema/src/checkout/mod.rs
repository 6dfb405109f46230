mod create_intent;
mod error_body;

pub use create_intent::{CreatePaymentIntentRequest, CreatePaymentIntentResponse};
pub use error_body::{ApiErrorBody, ApiErrorMessage};
