// ── Core error types ──
//
// User-facing errors from festa-core. Consumers never see raw HTTP
// detail; the `From<festa_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants. Server-reported business
// messages pass through verbatim.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the festival backend: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// Server-reported business error; `message` is the backend's
    /// message field verbatim.
    #[error("{message}")]
    Api { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<festa_api::Error> for CoreError {
    fn from(err: festa_api::Error) -> Self {
        match err {
            festa_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            festa_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            festa_api::Error::Transport(e) => CoreError::ConnectionFailed {
                reason: e.to_string(),
            },
            festa_api::Error::InvalidUrl(e) => CoreError::Internal(format!("invalid URL: {e}")),
            festa_api::Error::Api { status, message } => {
                if status == 404 {
                    CoreError::NotFound {
                        entity: "resource".into(),
                        identifier: message,
                    }
                } else {
                    CoreError::Api { message }
                }
            }
            festa_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
