//! Error handling module

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request error: {0}")]
    Transport(String),

    #[error("HTTP error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Response parse failed: {0}")]
    Parse(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Access token is not set or has no issue time")]
    TokenMissing,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Upstream HTTP errors keep their original status code
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TokenIssuance(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TokenMissing => StatusCode::BAD_REQUEST,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
