pub mod checkout;
pub mod stripe;

pub use checkout::{
    ApiErrorBody, ApiErrorMessage, CreatePaymentIntentRequest, CreatePaymentIntentResponse,
};
pub use stripe::{StripeErrorBody, StripeErrorObject, StripePaymentIntent};
