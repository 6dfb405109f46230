use super::extract::CheckoutPreprocess;
use crate::error::StorefrontError;
use crate::server::router::StorefrontState;
use axum::{
    Json,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::{TypedHeader, headers::Allow};
use storefront_schema::{ApiErrorBody, CreatePaymentIntentResponse};
use tracing::{debug, info, warn};

pub(super) async fn create_payment_intent_handler(
    State(state): State<StorefrontState>,
    CheckoutPreprocess(order): CheckoutPreprocess,
) -> Result<Json<CreatePaymentIntentResponse>, StorefrontError> {
    debug!(
        amount_minor = order.amount_minor,
        currency = %order.currency,
        "Incoming checkout request"
    );

    let intent = state
        .checkout
        .create_intent(order.amount_minor, &order.currency)
        .await?;

    info!(
        intent.id = %intent.id,
        intent.status = ?intent.status,
        amount_minor = intent.amount_minor,
        currency = %intent.currency,
        "Checkout ready for client confirmation"
    );

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

pub(super) async fn method_not_allowed_handler(method: Method) -> Response {
    warn!(%method, "Checkout endpoint called with unsupported method");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        TypedHeader(Allow::from_iter([Method::POST])),
        Json(ApiErrorBody::plain(format!("Method {method} Not Allowed"))),
    )
        .into_response()
}
