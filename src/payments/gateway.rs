use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::GatewayError;

/// What the checkout asks the processor for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentParams {
    pub amount_minor: i64,
    pub currency: String,
    /// Reused across retries of the same checkout so the processor deduplicates them.
    pub idempotency_key: String,
}

/// A created payment intent; only the client secret leaves the server.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub status: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
    pub created: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, GatewayError>;
}
