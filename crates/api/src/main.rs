use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crewpay_api::config::ServerConfig;
use crewpay_api::router::build_app_router;
use crewpay_api::state::AppState;
use crewpay_rates::ExchangeRateApi;
use crewpay_store::ProfileStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crewpay_api=debug,crewpay_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Settings store ---
    let store = ProfileStore::open(&config.data_dir)
        .await
        .expect("Failed to open data directory");
    crewpay_store::health_check(&store)
        .await
        .expect("Data directory health check failed");
    tracing::info!(data_dir = %config.data_dir.display(), "Profile store ready");

    // --- Rates client ---
    let rates = ExchangeRateApi::new(
        config.rates_url.clone(),
        Duration::from_secs(config.rates_timeout_secs),
    )
    .expect("Failed to build rates HTTP client");
    tracing::info!(url = %config.rates_url, "Rates client configured");

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        rates: Arc::new(rates),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
