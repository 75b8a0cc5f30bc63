// Festival backend HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, success-envelope
// unwrapping, and error normalization. All endpoint modules (festivals,
// zones, analytics, etc.) are implemented as inherent methods via
// separate files to keep this module focused on transport mechanics.

use std::sync::Arc;

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// A request interceptor: runs against every outgoing request before it
/// is sent. The hook point for auth headers and similar cross-cutting
/// request decoration.
pub type Interceptor = Arc<dyn Fn(RequestBuilder) -> RequestBuilder + Send + Sync>;

/// Build an interceptor that attaches a bearer token to every request.
pub fn bearer_token(token: SecretString) -> Interceptor {
    Arc::new(move |req| req.bearer_auth(token.expose_secret()))
}

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the festival admin backend.
///
/// Explicitly constructed and injectable — there is deliberately no
/// process-wide instance. Interceptors are composed at construction and
/// applied to every request in order.
///
/// All verb helpers return the raw response body as `serde_json::Value`,
/// with the backend's `{success, data, message}` envelope already
/// unwrapped when present. Interpreting the payload shape beyond that is
/// the caller's job (see [`crate::envelope`]) — the backend's envelope
/// format is not consistent across endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    interceptors: Vec<Interceptor>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a client from a `TransportConfig`.
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        // A trailing slash makes relative joins behave.
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Ok(Self {
            http,
            base_url,
            interceptors: Vec::new(),
        })
    }

    /// Create a client from the environment (`FESTA_API_BASE_URL`).
    pub fn from_env() -> Result<Self, Error> {
        Self::new(&TransportConfig::from_env())
    }

    /// Add a request interceptor. Interceptors run in registration order.
    pub fn with_interceptor(mut self, interceptor: Interceptor) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// The configured API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a relative path (e.g. `"festivals/3/zones"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining a relative path works.
        self.base_url
            .join(path.trim_start_matches('/'))
            .expect("path should be a valid relative URL")
    }

    /// The health probe lives at the server root, outside the versioned
    /// API path: `http://host:port/health` regardless of the base path.
    fn root_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url.set_query(None);
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get(&self, path: &str) -> Result<Value, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let req = self.decorate(self.http.get(url));
        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let req = self.decorate(self.http.post(url).json(body));
        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn put<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let req = self.decorate(self.http.put(url).json(body));
        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn patch<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, Error> {
        let url = self.url(path);
        debug!("PATCH {url}");

        let req = self.decorate(self.http.patch(url).json(body));
        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value, Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let req = self.decorate(self.http.delete(url));
        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    // ── Health probe ─────────────────────────────────────────────────

    /// `GET /health` — served at the server root, not under the API path.
    pub async fn health(&self) -> Result<Value, Error> {
        let url = self.root_url("/health");
        debug!("GET {url}");

        let req = self.decorate(self.http.get(url));
        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    // ── Request decoration ───────────────────────────────────────────

    fn decorate(&self, req: RequestBuilder) -> RequestBuilder {
        self.interceptors
            .iter()
            .fold(req, |req, interceptor| interceptor(req))
    }

    // ── Response handling ────────────────────────────────────────────

    /// Parse a response body, unwrapping the `{success, data, message}`
    /// envelope when present. Error statuses surface the server-supplied
    /// message verbatim in preference to a generic status string.
    async fn handle_response(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("request rejected: authentication failed");
            return Err(Error::Authentication {
                message: "authentication failed".into(),
            });
        }

        if !status.is_success() {
            let err = Self::parse_error(status, resp).await;
            warn!(error = %err, "request failed");
            return Err(err);
        }

        let text = resp.text().await?;
        if text.is_empty() {
            // DELETE and some PATCH endpoints respond 204 with no body.
            return Ok(Value::Null);
        }

        let body: Value = serde_json::from_str(&text).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: text.clone(),
        })?;

        Ok(Self::unwrap_envelope(body))
    }

    /// Unwrap one level of `{success: true, data: ...}`.
    ///
    /// Envelope-less bodies pass through untouched; deeper nesting is the
    /// normalizer's problem (`crate::envelope`).
    fn unwrap_envelope(body: Value) -> Value {
        match body {
            Value::Object(mut map)
                if map.get("success").and_then(Value::as_bool) == Some(true)
                    && map.contains_key("data") =>
            {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
