use crate::server::router::StorefrontState;
use axum::{
    Router,
    routing::{MethodRouter, post},
};

pub mod extract;
pub mod handlers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOrder {
    /// Minor units (cents).
    pub amount_minor: i64,
    /// Lowercase three-letter code.
    pub currency: String,
}

pub const CREATE_PAYMENT_INTENT_PATH: &str = "/api/create-payment-intent";
pub const PAYMENTS_PREFIX: &str = "/api/payments";
const CREATE_PAYMENT_INTENT_SUFFIX: &str = "/create-payment-intent";

/// Whether `path` is one of the two checkout endpoints.
pub fn is_checkout_path(path: &str) -> bool {
    path == CREATE_PAYMENT_INTENT_PATH
        || path
            .strip_prefix(PAYMENTS_PREFIX)
            .is_some_and(|rest| rest == CREATE_PAYMENT_INTENT_SUFFIX)
}

fn create_payment_intent_route() -> MethodRouter<StorefrontState> {
    post(handlers::create_payment_intent_handler).fallback(handlers::method_not_allowed_handler)
}

/// Top-level endpoint plus the same endpoint mounted under `/api/payments`.
pub fn router() -> Router<StorefrontState> {
    let payments = Router::new().route(CREATE_PAYMENT_INTENT_SUFFIX, create_payment_intent_route());

    Router::new()
        .route(CREATE_PAYMENT_INTENT_PATH, create_payment_intent_route())
        .nest(PAYMENTS_PREFIX, payments)
}
