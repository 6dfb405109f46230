mod payment_intent;
mod stripe_error;

pub use payment_intent::StripePaymentIntent;
pub use stripe_error::{StripeErrorBody, StripeErrorObject};
