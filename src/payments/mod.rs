//! Payment intent creation against the upstream processor.

mod amount;
mod checkout;
mod gateway;
mod stripe;

pub use amount::{normalize_currency, to_minor_units};
pub use checkout::CheckoutService;
pub use gateway::{PaymentGateway, PaymentIntent, PaymentIntentParams};
pub use stripe::StripeGateway;

/// Max characters of an upstream body kept in logs and fallback error messages.
pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;
