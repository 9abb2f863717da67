//! ThinQ OAuth token management
//!
//! The provider mints short-lived access tokens from a long-lived refresh
//! token. Refresh requests must carry an HMAC-SHA1 signature over the
//! url-encoded request path and an RFC-2822 timestamp.

use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha1::Sha1;
use tokio::sync::Mutex;

use crate::config::ThinqConfig;
use crate::error::AppError;

type HmacSha1 = Hmac<Sha1>;

/// Fixed token lifetime in seconds. The provider also reports `expires_in`,
/// but expiry decisions use this value only.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

const TOKEN_PATH: &str = "/oauth/1.0/oauth2/token";

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    issued_at: DateTime<Utc>,
}

/// Owns the process-wide access-token cache.
///
/// The single mutex covers the whole check-then-refresh sequence, so
/// concurrent requests never trigger redundant renewals or observe a token
/// without its issue time.
pub struct TokenManager {
    config: ThinqConfig,
    http_client: Client,
    cached: Mutex<Option<CachedToken>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl TokenManager {
    pub fn new(config: ThinqConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
            cached: Mutex::new(None),
        }
    }

    /// Make sure a usable token is cached, renewing it when absent or older
    /// than [`TOKEN_LIFETIME_SECS`].
    ///
    /// A failed renewal keeps the previous cached state and is only logged;
    /// callers proceed with whatever token is cached and the status API
    /// rejects a stale or missing token itself.
    pub async fn ensure_valid_token(&self) -> Option<String> {
        let mut cached = self.cached.lock().await;

        let needs_refresh = match cached.as_ref() {
            Some(token) => {
                let elapsed = (Utc::now() - token.issued_at).num_seconds();
                if elapsed > TOKEN_LIFETIME_SECS {
                    tracing::info!("[ThinQ] Access token expired, renewing");
                    true
                } else {
                    false
                }
            }
            None => {
                tracing::info!("[ThinQ] No access token, issuing a new one");
                true
            }
        };

        if needs_refresh {
            match self.refresh().await {
                Ok(token) => {
                    tracing::info!("[ThinQ] Access token issued");
                    *cached = Some(token);
                }
                Err(e) => {
                    tracing::error!("[ThinQ] {}", e);
                }
            }
        }

        cached.as_ref().map(|t| t.value.clone())
    }

    /// Cached token plus the seconds left before it counts as expired,
    /// floored at zero. `None` until the first successful issuance.
    pub async fn current_token(&self) -> Option<(String, i64)> {
        let cached = self.cached.lock().await;
        cached.as_ref().map(|token| {
            let elapsed = (Utc::now() - token.issued_at).num_seconds();
            let remaining = (TOKEN_LIFETIME_SECS - elapsed).max(0);
            (token.value.clone(), remaining)
        })
    }

    async fn refresh(&self) -> Result<CachedToken, AppError> {
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.config.refresh_token.as_str()),
        ];

        // The signature covers the url-encoded path and query of the
        // request, joined with the timestamp by a newline.
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();
        let request_url = format!("{}?{}", TOKEN_PATH, query);

        let timestamp = Utc::now().to_rfc2822();
        let signature = sign(
            &format!("{}\n{}", request_url, timestamp),
            &self.config.oauth_secret,
        );

        let token_url = format!("{}{}", self.config.oauth_uri, TOKEN_PATH);
        let response = self
            .http_client
            .post(&token_url)
            .header("x-lge-app-os", "ADR")
            .header("x-lge-appkey", &self.config.client_id)
            .header("x-lge-oauth-signature", signature)
            .header("x-lge-oauth-date", timestamp)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::TokenIssuance(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::TokenIssuance(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AppError::TokenIssuance(format!("token response parse failed: {}", e))
        })?;

        tracing::debug!(
            "[ThinQ] Provider reports expires_in={} sec (informational)",
            token.expires_in
        );

        Ok(CachedToken {
            value: token.access_token,
            issued_at: Utc::now(),
        })
    }
}

/// Base64 of the raw HMAC-SHA1 digest of `message` keyed by `key`, both
/// taken as UTF-8 bytes. Provider-mandated scheme, raw digest not hex.
pub fn sign(message: &str, key: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(message.as_bytes());
    let digest = mac.finalize().into_bytes();
    base64::engine::general_purpose::STANDARD.encode(digest)
}
