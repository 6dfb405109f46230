use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use std::{sync::Arc, time::Duration};
use storefront_schema::{StripeErrorBody, StripePaymentIntent};
use tracing::{debug, info};
use url::Url;

use super::{PaymentGateway, PaymentIntent, PaymentIntentParams, UPSTREAM_BODY_PREVIEW_CHARS};
use crate::config::PaymentsConfig;
use crate::error::GatewayError;
use crate::utils::logging::with_pretty_json_debug;

const PAYMENT_INTENTS_PATH: &str = "v1/payment_intents";
const IDEMPOTENCY_KEY: HeaderName = HeaderName::from_static("idempotency-key");
pub const STOREFRONT_USER_AGENT: &str = concat!("storefront/", env!("CARGO_PKG_VERSION"));

/// Payment intent gateway backed by the processor's form-encoded REST API.
///
/// One call is one HTTP attempt; retrying is left to the caller so the whole checkout shares a
/// single backoff budget.
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    payment_intents_url: Url,
    secret_key: Arc<str>,
}

impl StripeGateway {
    pub fn new(cfg: &PaymentsConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(STOREFRONT_USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.request_timeout_secs));

        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
            payment_intents_url: as_directory(&cfg.api_base).join(PAYMENT_INTENTS_PATH)?,
            secret_key: Arc::from(cfg.secret_key.trim()),
        })
    }

    pub fn payment_intents_url(&self) -> &Url {
        &self.payment_intents_url
    }

    pub fn build_create_request(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<reqwest::Request, reqwest::Error> {
        let mut request = self
            .client
            .post(self.payment_intents_url.clone())
            .bearer_auth(self.secret_key.as_ref())
            .form(&[
                ("amount", params.amount_minor.to_string()),
                ("currency", params.currency.clone()),
                ("automatic_payment_methods[enabled]", "true".to_string()),
            ]);

        if let Ok(value) = HeaderValue::from_str(&params.idempotency_key) {
            request = request.header(IDEMPOTENCY_KEY, value);
        }

        request.build()
    }

    async fn upstream_error(resp: reqwest::Response) -> GatewayError {
        let status = resp.status();
        let bytes = resp.bytes().await.unwrap_or_default();

        if let Ok(error) = serde_json::from_slice::<StripeErrorBody>(&bytes) {
            with_pretty_json_debug(&error, |pretty_error| {
                debug!(%status, body = %pretty_error, "Upstream structured error");
            });
            return GatewayError::Upstream {
                status,
                message: error.describe(),
                code: error.inner.code,
            };
        }

        let raw_body = String::from_utf8_lossy(&bytes);
        let body_preview = format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS);
        debug!(%status, body = %body_preview, "Upstream unstructured error");

        GatewayError::Upstream {
            status,
            code: None,
            message: if body_preview.trim().is_empty() {
                format!("Upstream error with status: {status}")
            } else {
                body_preview
            },
        }
    }
}

/// `Url::join` replaces the last path segment unless the base ends with `/`.
fn as_directory(base: &Url) -> Url {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, GatewayError> {
        let req = self.build_create_request(params)?;
        let resp = self.client.execute(req).await?;

        if !resp.status().is_success() {
            return Err(Self::upstream_error(resp).await);
        }

        let intent: StripePaymentIntent = resp.json().await?;
        with_pretty_json_debug(&intent, |pretty_intent| {
            debug!(body = %pretty_intent, "Upstream payment intent");
        });

        let client_secret = intent
            .client_secret
            .ok_or_else(|| GatewayError::MissingClientSecret(intent.id.clone()))?;

        info!(
            intent.id = %intent.id,
            intent.status = ?intent.status,
            intent.amount = intent.amount,
            intent.currency = %intent.currency,
            "Payment intent created"
        );

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
            status: intent.status,
            amount_minor: intent.amount,
            currency: intent.currency,
            created: intent.created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn gateway(api_base: &str) -> StripeGateway {
        let cfg = PaymentsConfig {
            api_base: Url::parse(api_base).expect("invalid url"),
            secret_key: " sk_test_123 ".to_string(),
            ..PaymentsConfig::default()
        };
        StripeGateway::new(&cfg).expect("failed to build gateway")
    }

    fn params() -> PaymentIntentParams {
        PaymentIntentParams {
            amount_minor: 1000,
            currency: "usd".to_string(),
            idempotency_key: "checkout-1".to_string(),
        }
    }

    #[test]
    fn payment_intents_url_resolves_against_api_base() {
        assert_eq!(
            gateway("https://api.stripe.com/").payment_intents_url().as_str(),
            "https://api.stripe.com/v1/payment_intents"
        );
        assert_eq!(
            gateway("http://127.0.0.1:12111").payment_intents_url().as_str(),
            "http://127.0.0.1:12111/v1/payment_intents"
        );
    }

    #[test]
    fn api_base_path_prefix_is_kept_with_or_without_trailing_slash() {
        assert_eq!(
            gateway("http://host/stripe").payment_intents_url().as_str(),
            "http://host/stripe/v1/payment_intents"
        );
        assert_eq!(
            gateway("http://host/stripe/").payment_intents_url().as_str(),
            "http://host/stripe/v1/payment_intents"
        );
    }

    #[test]
    fn build_create_request_sets_auth_idempotency_and_form_body() {
        let gw = gateway("http://example.test/");
        let req = gw
            .build_create_request(&params())
            .expect("failed to build request");

        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.url().as_str(), "http://example.test/v1/payment_intents");
        assert_eq!(
            req.headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer sk_test_123")
        );
        assert_eq!(
            req.headers()
                .get("idempotency-key")
                .and_then(|v| v.to_str().ok()),
            Some("checkout-1")
        );
        assert_eq!(
            req.headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/x-www-form-urlencoded")
        );

        let body = req
            .body()
            .and_then(|b| b.as_bytes())
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .expect("form body");
        assert_eq!(
            body,
            "amount=1000&currency=usd&automatic_payment_methods%5Benabled%5D=true"
        );
    }
}
