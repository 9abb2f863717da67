//! ThinQ status API client

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Deserialize;

use crate::error::AppError;
use crate::thinq::TokenManager;

pub struct ThinqClient {
    api_url: String,
    tokens: Arc<TokenManager>,
    http_client: Client,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    result: Option<StatusResult>,
}

#[derive(Debug, Deserialize)]
struct StatusResult {
    devices: Option<Vec<Device>>,
}

/// One appliance as reported by the dashboard endpoint. Every field is
/// optional; idle or offline units omit the telemetry block entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub alias: Option<String>,
    pub snapshot: Option<Snapshot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "washerDryer")]
    pub washer_dryer: Option<WasherDryer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WasherDryer {
    #[serde(rename = "remainTimeMinute")]
    pub remain_time_minute: Option<i64>,
}

impl Device {
    /// Remaining run time in minutes, when the unit is mid-cycle.
    pub fn remain_time_minute(&self) -> Option<i64> {
        self.snapshot
            .as_ref()?
            .washer_dryer
            .as_ref()?
            .remain_time_minute
    }
}

/// Fixed app-identity header bundle for the ThinQ dashboard API. The
/// values mirror the mobile app the account is registered with and must be
/// sent as-is; the access token rides in `x-emp-token`.
fn request_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-country-code", HeaderValue::from_static("KR"));
    headers.insert("x-service-phase", HeaderValue::from_static("OP"));
    headers.insert(
        "User-Agent",
        HeaderValue::from_static("LG ThinQ/5.0.31240 (iPhone; iOS 17.6.1; Scale/3.00)"),
    );
    headers.insert("x-thinq-app-ver", HeaderValue::from_static("5.0.3000"));
    headers.insert("x-thinq-app-type", HeaderValue::from_static("NUTS"));
    headers.insert("x-language-code", HeaderValue::from_static("ko-KR"));
    headers.insert("x-thinq-app-logintype", HeaderValue::from_static("GGL"));
    headers.insert("x-os-version", HeaderValue::from_static("17.6.1"));
    headers.insert(
        "x-client-id",
        HeaderValue::from_static(
            "336726ec3e6087a3a032151ed6025c90109390f4534776a320e4d77bcca8aa99",
        ),
    );
    headers.insert("x-thinq-app-level", HeaderValue::from_static("PRD"));
    headers.insert("x-app-version", HeaderValue::from_static("5.0.31240"));
    headers.insert("x-user-no", HeaderValue::from_static("KR2403313722065"));
    headers.insert("x-service-code", HeaderValue::from_static("SVC202"));
    headers.insert(
        "Accept-Language",
        HeaderValue::from_static("ko-KR;q=1, en-KR;q=0.9"),
    );
    headers.insert(
        "x-message-id",
        HeaderValue::from_static("B51084B6-7D85-4E95-BDB0-BD7DFA72C938"),
    );
    headers.insert(
        "x-emp-token",
        HeaderValue::from_str(token).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("x-origin", HeaderValue::from_static("app-native"));
    headers.insert("Accept", HeaderValue::from_static("application/json"));
    headers.insert("x-model-name", HeaderValue::from_static("iPhone 14 Pro"));
    headers.insert(
        "Content-Type",
        HeaderValue::from_static("application/json;charset=UTF-8"),
    );
    headers.insert("x-api-key", HeaderValue::from_static("VGhpblEyLjAgU0VSVklDRQ=="));
    headers.insert("x-thinq-app-os", HeaderValue::from_static("IOS"));
    headers
}

impl ThinqClient {
    pub fn new(api_url: String, tokens: Arc<TokenManager>) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url,
            tokens,
            http_client,
        }
    }

    /// Fetch the raw device list from the dashboard endpoint.
    ///
    /// Ensures a token first; if issuance failed the request still goes out
    /// with an empty `x-emp-token` and the upstream answers 401, which is
    /// propagated like any other upstream status.
    pub async fn fetch_devices(&self) -> Result<Vec<Device>, AppError> {
        let token = self.tokens.ensure_valid_token().await.unwrap_or_default();

        let response = self
            .http_client
            .get(&self.api_url)
            .headers(request_headers(&token))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("[ThinQ] Status request failed: {}", e);
                AppError::Transport(format!("status request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("[ThinQ] Status API returned {}: {}", status, body);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("status API returned {}", status),
            });
        }

        let body: StatusResponse = response.json().await.map_err(|e| {
            tracing::error!("[ThinQ] Status response parse failed: {}", e);
            AppError::Parse(format!("status response parse failed: {}", e))
        })?;

        Ok(body.result.and_then(|r| r.devices).unwrap_or_default())
    }
}
