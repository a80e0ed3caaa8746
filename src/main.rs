//! Game Listing Server - public game browser for a multiplayer game server
//!
//! This is the main entry point for the HTTP service. It handles:
//! - Game browser listings filtered by map, chat language and impostor count
//! - Address lookup for an existing game and for hosting a new one
//! - Placeholder matchmaking tokens

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_listing_server::app::AppState;
use game_listing_server::config::Config;
use game_listing_server::game::RoomRegistry;
use game_listing_server::http::build_router;
use game_listing_server::util::rate_limit::ListingRateLimiter;
use game_listing_server::util::time::init_server_time;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    // Initialize server time tracking
    init_server_time();

    info!("Starting Game Listing Server");
    info!("Server address: {}", config.server_addr);
    info!("Public game server address: {}", config.public_addr());

    // Rooms are published here by the game server
    let rooms = Arc::new(RoomRegistry::new());

    // Create application state
    let state = AppState::new(config.clone(), rooms);

    // Forget idle clients' rate limit buckets
    tokio::spawn(prune_rate_limits(state.listing_limiter.clone()));

    // Build router
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server_addr;

    if let Some((cert, key)) = config.tls_files() {
        let tls = RustlsConfig::from_pem_file(cert, key).await?;

        let handle = axum_server::Handle::new();
        tokio::spawn({
            let handle = handle.clone();
            async move {
                shutdown_signal().await;
                handle.graceful_shutdown(Some(Duration::from_secs(10)));
            }
        });

        info!("Server listening on {} (HTTPS)", addr);
        info!("Game browser: https://{}/api/games", addr);

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(router.into_make_service_with_connect_info::<SocketAddr>())
            .await?;
    } else {
        let listener = TcpListener::bind(addr).await?;

        info!("Server listening on {}", addr);
        info!("Game browser: http://{}/api/games", addr);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Periodically drop rate limit state of clients that went quiet
async fn prune_rate_limits(limiter: ListingRateLimiter) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    loop {
        interval.tick().await;
        limiter.retain_recent();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        }
    }
}
