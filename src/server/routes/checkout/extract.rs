use crate::error::StorefrontError;
use crate::payments::{normalize_currency, to_minor_units};
use crate::server::router::StorefrontState;
use crate::utils::logging::with_pretty_json_debug;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use storefront_schema::CreatePaymentIntentRequest;
use tracing::debug;

use super::CheckoutOrder;

pub(crate) struct CheckoutPreprocess(pub(crate) CheckoutOrder);

impl FromRequest<StorefrontState> for CheckoutPreprocess {
    type Rejection = StorefrontError;

    /// Extract and validate a `create-payment-intent` request.
    ///
    /// - Body must be a JSON object; syntax/shape errors become `InvalidBody` (400), while a
    ///   missing JSON content type or an oversized body keep their 415/413 status.
    /// - `amount` must be numeric (or a numeric string), finite, and at least one cent after
    ///   rounding to minor units; otherwise `InvalidAmount`.
    /// - `currency` defaults to the configured currency and must be a three-letter code.
    async fn from_request(req: Request, state: &StorefrontState) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<CreatePaymentIntentRequest>::from_request(req, &()).await?;

        with_pretty_json_debug(&body, |pretty_body| {
            debug!(body = %pretty_body, "Incoming checkout request body");
        });

        let amount_minor = body
            .amount_major()
            .and_then(to_minor_units)
            .ok_or(StorefrontError::InvalidAmount)?;

        let currency = match body.currency.as_deref() {
            Some(raw) => normalize_currency(raw)
                .ok_or_else(|| StorefrontError::InvalidCurrency(raw.to_string()))?,
            None => state.checkout.default_currency().to_string(),
        };

        Ok(Self(CheckoutOrder {
            amount_minor,
            currency,
        }))
    }
}
