// ── Runtime configuration ──
//
// Describes how the data layer talks to the backend. The presentation
// layer constructs a `ConsoleConfig` and hands it in; core never reads
// config files.

use std::time::Duration;

use url::Url;

use festa_api::transport::{self, TransportConfig};

/// Configuration for the console's data layer.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// API base URL (e.g. `http://localhost:8080/api`).
    pub base_url: Url,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Cadence for the analytics poll (congestion + SNS sentiment).
    pub analytics_poll_interval: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(transport::DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(transport::REQUEST_TIMEOUT_SECS),
            analytics_poll_interval: Duration::from_secs(30),
        }
    }
}

impl ConsoleConfig {
    /// Build from the environment (`FESTA_API_BASE_URL`), falling back to
    /// the local development address.
    pub fn from_env() -> Self {
        let transport = TransportConfig::from_env();
        Self {
            base_url: transport.base_url,
            timeout: transport.timeout,
            analytics_poll_interval: Duration::from_secs(30),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }
}
