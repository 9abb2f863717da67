//! washtower-proxy-gateway - Laundry Status Gateway
//!
//! Proxies LG ThinQ washer/dryer telemetry into a simplified status API
//! for the building's laundry rooms, handling the OAuth token lifecycle
//! against the ThinQ cloud transparently.

mod api;
mod config;
mod error;
mod thinq;
mod washtower;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::AppState;
use crate::thinq::{ThinqClient, TokenManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "washtower_proxy_gateway=info,tower_http=debug".into()),
        )
        .init();

    tracing::info!("Starting washtower-proxy-gateway...");

    // Load configuration
    let config = config::Config::load()?;
    let api_url = config
        .thinq
        .api_url
        .clone()
        .context("ThinQ status API URL is not configured")?;
    tracing::info!("Configuration loaded");

    // Wire up shared state
    let tokens = Arc::new(TokenManager::new(config.thinq));
    let thinq = Arc::new(ThinqClient::new(api_url, tokens.clone()));
    let state = AppState::new(tokens, thinq);

    // Build application router
    let cors = CorsLayer::permissive();

    let app = api::routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    // Start server
    let host = config
        .server
        .host
        .parse()
        .context("Invalid server host address")?;
    let addr = SocketAddr::new(host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
