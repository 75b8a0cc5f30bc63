// Transport configuration for building reqwest::Client instances.
//
// One place owns the base URL, timeout, and content negotiation so the
// ApiClient never hand-rolls builder logic.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

/// Environment variable selecting the API base URL.
pub const BASE_URL_ENV: &str = "FESTA_API_BASE_URL";

/// Default base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Fixed request timeout, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transport configuration for the festival backend.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl TransportConfig {
    /// Build a config from the environment, falling back to the local
    /// development address when `FESTA_API_BASE_URL` is unset or invalid.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .and_then(|raw| Url::parse(&raw).ok())
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"));
        Self {
            base_url,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the base URL (test servers, staging environments).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build a `reqwest::Client` from this config.
    ///
    /// JSON content negotiation is applied as default headers.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("festa-console/0.1.0")
            .default_headers(headers)
            .build()
            .map_err(crate::error::Error::Transport)
    }
}
