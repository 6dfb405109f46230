use crate::config::BasicConfig;
use crate::payments::CheckoutService;
use crate::server::routes::checkout;

use axum::{
    Router,
    extract::Request,
    http::{
        HeaderName, HeaderValue, Method, StatusCode,
        header::{CONTENT_TYPE, USER_AGENT},
    },
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{Level, warn};
use uuid::Uuid;

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn new_request_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Client-supplied id when it is non-empty, bounded and header-safe; a fresh one otherwise.
fn request_id_for(req: &Request) -> String {
    req.headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(new_request_id, str::to_string)
}

fn access_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

#[derive(Clone)]
pub struct StorefrontState {
    pub checkout: CheckoutService,
}

impl StorefrontState {
    pub fn new(checkout: CheckoutService) -> Self {
        Self { checkout }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn healthz_handler() -> &'static str {
    "ok"
}

macro_rules! access_event {
    ($level:expr, $($fields:tt)*) => {{
        let level = $level;
        if level == Level::ERROR {
            tracing::error!($($fields)*);
        } else if level == Level::WARN {
            tracing::warn!($($fields)*);
        } else {
            tracing::info!($($fields)*);
        }
    }};
}

async fn access_log(req: Request, next: Next) -> Response {
    let request_id = request_id_for(&req);
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let version = req.version();
    let checkout = checkout::is_checkout_path(&path);
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    access_event!(
        access_level(status),
        request_id = %request_id,
        status = status.as_u16(),
        %method,
        %path,
        ?version,
        latency_ms,
        checkout,
        user_agent = %user_agent,
        "{} {} -> {}",
        method,
        path,
        status.as_u16()
    );

    resp
}

/// CORS for the browser checkout; `None` when no origin is configured or none parses.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::POST])
            .allow_headers([CONTENT_TYPE, X_REQUEST_ID]),
    )
}

pub fn storefront_router(state: StorefrontState, basic: &BasicConfig) -> Router {
    let mut router = Router::new()
        .merge(checkout::router())
        .route("/healthz", get(healthz_handler))
        .fallback(not_found_handler)
        .with_state(state);

    if let Some(cors) = cors_layer(&basic.cors_allowed_origins) {
        router = router.layer(cors);
    }

    router.layer(middleware::from_fn(access_log))
}
