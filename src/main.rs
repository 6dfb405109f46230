use mimalloc::MiMalloc;
use std::{net::SocketAddr, sync::Arc};
use storefront::{
    config::Config,
    payments::{CheckoutService, StripeGateway},
    server::router::{StorefrontState, storefront_router},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        loglevel = %cfg.basic.loglevel,
        cors_allowed_origins = ?cfg.basic.cors_allowed_origins,
        "Basic config loaded"
    );
    info!(
        api_base = %cfg.payments.api_base,
        secret_key = %cfg.payments.redacted_secret_key(),
        default_currency = %cfg.payments.default_currency,
        proxy = %cfg.payments.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        retry_max_retries = cfg.retry.max_retries,
        retry_initial_delay_ms = cfg.retry.initial_delay_ms,
        retry_max_delay_ms = cfg.retry.max_delay_ms,
        "Payments config (effective)"
    );

    let gateway = Arc::new(StripeGateway::new(&cfg.payments)?);
    info!(endpoint = %gateway.payment_intents_url(), "Payment gateway ready");
    let checkout = CheckoutService::new(gateway, &cfg.retry, &cfg.payments.default_currency);
    let app = storefront_router(StorefrontState::new(checkout), &cfg.basic);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let received = shutdown_signal().await;
            info!(signal = received, "Stopping checkout server, draining in-flight requests");
        })
        .await?;
    info!("Checkout server stopped");
    Ok(())
}

/// Resolves with the name of the first termination signal received.
///
/// A signal whose handler cannot be installed is logged and never fires.
async fn shutdown_signal() -> &'static str {
    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "Cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    }
}
