//! Configuration for the NoteHub service client.

use notehub_core::defaults::{
    ENV_BASE_URL, ENV_TIMEOUT_SECS, ENV_TOKEN, REQUEST_TIMEOUT_SECS, SERVICE_BASE_URL,
};

/// Configuration for connecting to the note service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the service API (no trailing slash needed).
    pub base_url: String,
    /// Bearer token for authentication. When absent, requests carry no
    /// Authorization header at all.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: SERVICE_BASE_URL.to_string(),
            token: None,
            timeout_seconds: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables, reading a `.env`
    /// file first when one is present. Unset variables fall back to
    /// defaults; the token stays optional.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            base_url: std::env::var(ENV_BASE_URL).unwrap_or_else(|_| SERVICE_BASE_URL.to_string()),
            token: std::env::var(ENV_TOKEN).ok().filter(|t| !t.is_empty()),
            timeout_seconds: std::env::var(ENV_TIMEOUT_SECS)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the request timeout.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}
