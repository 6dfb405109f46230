use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storefront_schema::ApiErrorBody;
use thiserror::Error as ThisError;

use super::GatewayError;

#[derive(Debug, ThisError)]
pub enum StorefrontError {
    /// Missing, non-numeric, non-finite, non-positive, or sub-cent amount.
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// Body rejected before validation. `status` is 413 or 415 when the rejection says so,
    /// otherwise 400.
    #[error("Invalid request body")]
    InvalidBody {
        status: StatusCode,
        debug_message: String,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<JsonRejection> for StorefrontError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            status @ (StatusCode::PAYLOAD_TOO_LARGE | StatusCode::UNSUPPORTED_MEDIA_TYPE) => status,
            _ => StatusCode::BAD_REQUEST,
        };
        StorefrontError::InvalidBody {
            status,
            debug_message: rejection.body_text(),
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            StorefrontError::InvalidAmount => {
                let body = ApiErrorBody::plain("Invalid amount: must be a number greater than 0");
                tracing::warn!(message = body.message(), "Checkout request rejected");
                (StatusCode::BAD_REQUEST, body)
            }

            StorefrontError::InvalidCurrency(currency) => {
                let body = ApiErrorBody::plain(format!("Invalid currency: {currency}"));
                tracing::warn!(message = body.message(), "Checkout request rejected");
                (StatusCode::BAD_REQUEST, body)
            }

            StorefrontError::InvalidBody {
                status,
                debug_message,
            } => {
                let body = match status {
                    StatusCode::PAYLOAD_TOO_LARGE => {
                        ApiErrorBody::plain("Invalid request body: payload too large")
                    }
                    StatusCode::UNSUPPORTED_MEDIA_TYPE => ApiErrorBody::plain(
                        "Invalid request body: expected Content-Type: application/json",
                    ),
                    _ => ApiErrorBody::plain("Invalid request body: expected a JSON object"),
                };
                tracing::warn!(
                    status = status.as_u16(),
                    message = body.message(),
                    debug_message = %debug_message,
                    "Checkout request rejected"
                );
                (status, body)
            }

            StorefrontError::Gateway(error) => {
                let body = ApiErrorBody::detailed(error.to_string());
                tracing::error!(
                    upstream_status = ?error.status(),
                    message = body.message(),
                    "Creating payment intent failed"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}
