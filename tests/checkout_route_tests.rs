use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::ALLOW},
};
use reqwest::StatusCode as UpstreamStatus;
use std::sync::{Arc, Mutex};
use storefront::{
    GatewayError,
    config::{BasicConfig, RetryConfig},
    payments::{CheckoutService, PaymentGateway, PaymentIntent, PaymentIntentParams},
    server::router::{StorefrontState, storefront_router},
};
use tower::ServiceExt;

/// Accepts every request unless told to fail with a fixed upstream status.
#[derive(Default)]
struct StubGateway {
    fail_with: Option<UpstreamStatus>,
    calls: Mutex<Vec<PaymentIntentParams>>,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, GatewayError> {
        self.calls.lock().expect("poisoned").push(params.clone());
        if let Some(status) = self.fail_with {
            return Err(GatewayError::Upstream {
                status,
                code: Some("card_declined".to_string()),
                message: "Your card was declined.".to_string(),
            });
        }
        Ok(PaymentIntent {
            id: "pi_stub".to_string(),
            client_secret: format!("pi_stub_secret_{}", params.amount_minor),
            status: Some("requires_payment_method".to_string()),
            amount_minor: params.amount_minor,
            currency: params.currency.clone(),
            created: None,
        })
    }
}

fn app_with(gateway: Arc<StubGateway>) -> Router {
    let retry = RetryConfig {
        max_retries: 0,
        ..RetryConfig::default()
    };
    let checkout = CheckoutService::new(gateway, &retry, "usd");
    storefront_router(StorefrontState::new(checkout), &BasicConfig::default())
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

async fn body_string(resp: axum::response::Response) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

#[tokio::test]
async fn valid_amount_returns_client_secret_in_cents() {
    let gateway = Arc::new(StubGateway::default());
    let app = app_with(gateway.clone());

    let resp = app
        .oneshot(post_json("/api/create-payment-intent", r#"{"amount":10}"#))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(
        body_string(resp).await,
        r#"{"clientSecret":"pi_stub_secret_1000"}"#
    );

    let calls = gateway.calls.lock().expect("poisoned").clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount_minor, 1000);
    assert_eq!(calls[0].currency, "usd");
    assert!(!calls[0].idempotency_key.is_empty());
}

#[tokio::test]
async fn nested_route_accepts_explicit_currency_and_rounds() {
    let gateway = Arc::new(StubGateway::default());
    let app = app_with(gateway.clone());

    let resp = app
        .oneshot(post_json(
            "/api/payments/create-payment-intent",
            r#"{"amount":19.999,"currency":"EUR"}"#,
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let calls = gateway.calls.lock().expect("poisoned").clone();
    assert_eq!(calls[0].amount_minor, 2000);
    assert_eq!(calls[0].currency, "eur");
}

#[tokio::test]
async fn invalid_amounts_are_rejected_before_reaching_the_gateway() {
    let gateway = Arc::new(StubGateway::default());
    let app = app_with(gateway.clone());

    for body in [
        r#"{"amount":-5}"#,
        r#"{"amount":"abc"}"#,
        r#"{"amount":0}"#,
        r#"{"amount":0.001}"#,
        r#"{"amount":null}"#,
        r#"{"currency":"usd"}"#,
    ] {
        let resp = app
            .clone()
            .oneshot(post_json("/api/create-payment-intent", body))
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");

        let json: serde_json::Value =
            serde_json::from_str(&body_string(resp).await).expect("error body is json");
        assert!(json["error"].is_string(), "body: {body}");
    }

    assert!(gateway.calls.lock().expect("poisoned").is_empty());
}

#[tokio::test]
async fn malformed_json_and_bad_currency_are_400() {
    let app = app_with(Arc::new(StubGateway::default()));

    let resp = app
        .clone()
        .oneshot(post_json("/api/create-payment-intent", "not-json"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/create-payment-intent",
            r#"{"amount":5,"currency":"dollars"}"#,
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(resp).await,
        r#"{"error":"Invalid currency: dollars"}"#
    );
}

#[tokio::test]
async fn large_amounts_reach_the_gateway_uncapped() {
    let gateway = Arc::new(StubGateway::default());
    let app = app_with(gateway.clone());

    let resp = app
        .oneshot(post_json(
            "/api/create-payment-intent",
            r#"{"amount":1000000}"#,
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let calls = gateway.calls.lock().expect("poisoned").clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount_minor, 100_000_000);
}

#[tokio::test]
async fn missing_content_type_is_415_and_oversized_body_is_413() {
    let gateway = Arc::new(StubGateway::default());
    let app = app_with(gateway.clone());

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/create-payment-intent")
                .body(Body::from(r#"{"amount":10}"#))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json: serde_json::Value =
        serde_json::from_str(&body_string(resp).await).expect("error body is json");
    assert!(json["error"].is_string());

    let oversized = format!(r#"{{"amount":10,"pad":"{}"}}"#, "x".repeat(3 * 1024 * 1024));
    let resp = app
        .oneshot(post_json("/api/create-payment-intent", &oversized))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    assert!(gateway.calls.lock().expect("poisoned").is_empty());
}

#[tokio::test]
async fn other_methods_get_405_with_allow_post() {
    let app = app_with(Arc::new(StubGateway::default()));

    for (method, uri) in [
        ("GET", "/api/create-payment-intent"),
        ("PUT", "/api/create-payment-intent"),
        ("DELETE", "/api/payments/create-payment-intent"),
    ] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(
            resp.headers().get(ALLOW).and_then(|v| v.to_str().ok()),
            Some("POST"),
            "{method} {uri}"
        );
    }
}

#[tokio::test]
async fn gateway_failure_is_500_with_upstream_message() {
    let gateway = Arc::new(StubGateway {
        fail_with: Some(UpstreamStatus::PAYMENT_REQUIRED),
        ..StubGateway::default()
    });
    let app = app_with(gateway);

    let resp = app
        .oneshot(post_json("/api/create-payment-intent", r#"{"amount":10}"#))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_string(resp).await,
        r#"{"error":{"message":"Your card was declined."}}"#
    );
}

#[tokio::test]
async fn unknown_routes_are_404_and_healthz_is_ok() {
    let app = app_with(Arc::new(StubGateway::default()));

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/does-not-exist")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
    assert_eq!(body_string(resp).await, "ok");
}
