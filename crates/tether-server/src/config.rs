//! Server configuration, loaded from environment variables.

use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Path to the SQLite user directory.
    pub db_path: String,
    /// Shared secret for validating the auth provider's bearer tokens.
    pub jwt_secret: String,
    /// Base URL of the hosted chat backend's server API.
    pub chat_base_url: String,
    /// Public API key for the chat backend.
    pub chat_api_key: String,
    /// Private API secret used to sign chat credentials.
    pub chat_api_secret: String,
    /// Per-request timeout for chat backend calls.
    pub chat_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = var("TETHER_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("Invalid TETHER_PORT")?;
        let timeout_secs: u64 = var("CHAT_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("Invalid CHAT_TIMEOUT_SECS")?;

        Ok(Self {
            host: var("TETHER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            db_path: var("TETHER_DB_PATH").unwrap_or_else(|| "tether.db".to_string()),
            jwt_secret: var("TETHER_JWT_SECRET")
                .unwrap_or_else(|| "dev-secret-change-me".to_string()),
            chat_base_url: var("CHAT_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3080".to_string()),
            chat_api_key: var("CHAT_API_KEY").context("CHAT_API_KEY is required")?,
            chat_api_secret: var("CHAT_API_SECRET").context("CHAT_API_SECRET is required")?,
            chat_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
