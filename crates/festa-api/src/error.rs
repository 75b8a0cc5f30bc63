use thiserror::Error;

/// Top-level error type for the `festa-api` crate.
///
/// Covers every failure mode of the HTTP surface: authentication,
/// transport, and server-reported business errors. `festa-core` maps
/// these into user-facing diagnostics; nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend rejected the request with HTTP 401.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Server-reported ─────────────────────────────────────────────
    /// Business error from the backend. `message` is the server-supplied
    /// message field verbatim when one was present, otherwise the HTTP
    /// status string.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl From<reqwest::Error> for Error {
    /// Transport errors are normalized at the boundary: a reqwest-level
    /// timeout becomes the distinct [`Error::Timeout`] condition rather
    /// than a generic network error.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                timeout_secs: crate::transport::REQUEST_TIMEOUT_SECS,
            }
        } else {
            Self::Transport(err)
        }
    }
}

impl Error {
    /// Returns `true` if re-authentication might resolve this error.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status == 404,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}
