use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::{PaymentGateway, PaymentIntent, PaymentIntentParams};
use crate::config::RetryConfig;
use crate::error::{GatewayError, IsRetryable};
use crate::retry::{RetryOptions, retry};

/// Creates payment intents for checkouts, retrying transient processor failures.
#[derive(Clone)]
pub struct CheckoutService {
    gateway: Arc<dyn PaymentGateway>,
    retry_options: RetryOptions<GatewayError>,
    default_currency: Arc<str>,
}

impl CheckoutService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        retry_cfg: &RetryConfig,
        default_currency: &str,
    ) -> Self {
        let retry_options = retry_cfg
            .to_options()
            .with_should_retry(|err: &GatewayError| err.is_retryable());
        Self {
            gateway,
            retry_options,
            default_currency: Arc::from(default_currency),
        }
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// Every attempt of one checkout carries the same idempotency key.
    pub async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, GatewayError> {
        let params = PaymentIntentParams {
            amount_minor,
            currency: currency.to_string(),
            idempotency_key: Uuid::new_v4().to_string(),
        };

        info!(
            amount_minor,
            currency = %params.currency,
            idempotency_key = %params.idempotency_key,
            "Creating payment intent"
        );

        let gateway = self.gateway.as_ref();
        let params = &params;
        retry(
            move || gateway.create_payment_intent(params),
            &self.retry_options,
        )
        .await
    }
}
