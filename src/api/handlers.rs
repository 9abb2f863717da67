//! HTTP handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::api::AppState;
use crate::error::AppError;
use crate::washtower::{self, DeviceView};

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Health check handler
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "washtower-proxy-gateway".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /home - every unit currently reporting a remaining run time
pub async fn get_all_devices(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeviceView>>, AppError> {
    let devices = state.thinq.fetch_devices().await?;
    Ok(Json(washtower::all_devices(&devices)))
}

/// GET /home/:room_id - one laundry room, renamed and sorted
pub async fn get_devices_by_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<DeviceView>>, AppError> {
    let devices = state.thinq.fetch_devices().await?;
    Ok(Json(washtower::room_devices(&devices, &room_id)))
}

#[derive(Serialize)]
pub struct AccessTokenInfo {
    pub access_token: String,
    pub remaining_time: i64,
}

/// GET /accesstoken - current token and the seconds left before renewal
pub async fn get_access_token(
    State(state): State<AppState>,
) -> Result<Json<AccessTokenInfo>, AppError> {
    match state.tokens.current_token().await {
        Some((access_token, remaining_time)) => Ok(Json(AccessTokenInfo {
            access_token,
            remaining_time,
        })),
        None => Err(AppError::TokenMissing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThinqConfig;
    use crate::thinq::TokenManager;
    use std::sync::Arc;

    fn idle_state() -> AppState {
        let tokens = Arc::new(TokenManager::new(ThinqConfig::default()));
        let thinq = Arc::new(crate::thinq::ThinqClient::new(
            "http://127.0.0.1:0".to_string(),
            tokens.clone(),
        ));
        AppState::new(tokens, thinq)
    }

    #[tokio::test]
    async fn test_access_token_before_issuance_is_an_error() {
        let result = get_access_token(State(idle_state())).await;
        assert!(matches!(result, Err(AppError::TokenMissing)));
    }
}
