//! Configuration module

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub thinq: ThinqConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Credentials and endpoints for the ThinQ cloud.
///
/// Only `api_url` is mandatory; the OAuth fields default to empty strings,
/// in which case token issuance fails and status requests go out
/// unauthenticated (the upstream rejects them itself).
#[derive(Debug, Clone, Deserialize)]
pub struct ThinqConfig {
    pub api_url: Option<String>,
    #[serde(default)]
    pub oauth_uri: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub oauth_secret: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ThinqConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            oauth_uri: String::new(),
            client_id: String::new(),
            oauth_secret: String::new(),
            refresh_token: String::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9000
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("WASHTOWER").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize().unwrap_or_else(|_| Config {
            server: ServerConfig::default(),
            thinq: ThinqConfig::default(),
        });

        Ok(config)
    }
}
