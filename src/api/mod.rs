//! API module - HTTP handlers and routes

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::thinq::{ThinqClient, TokenManager};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenManager>,
    pub thinq: Arc<ThinqClient>,
}

impl AppState {
    pub fn new(tokens: Arc<TokenManager>, thinq: Arc<ThinqClient>) -> Self {
        Self { tokens, thinq }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Laundry status
        .route("/home", get(handlers::get_all_devices))
        .route("/home/:room_id", get(handlers::get_devices_by_room))
        // Token introspection
        .route("/accesstoken", get(handlers::get_access_token))
}
