//! Async HTTP client for the festival admin console backend.
//!
//! This crate owns the transport layer and nothing else:
//!
//! - **[`ApiClient`]** — an explicitly constructed, injectable HTTP client
//!   (base URL, fixed timeout, JSON content negotiation) with composable
//!   request [`Interceptor`]s as the auth-header hook point. Every request
//!   and failure is traced.
//! - **Resource clients** — one pass-through function per backend
//!   operation (festivals, zones, analytics, dashboard, SNS feedback),
//!   implemented as inherent methods in per-resource modules. No retries,
//!   no caching, no interpretation of responses.
//! - **[`envelope`]** — the response-shape normalizer. The backend's
//!   envelope format is not guaranteed consistent across endpoints, so
//!   "what is the data" is decided in exactly one place, and never by
//!   raising.
//! - **[`Error`]** — the transport-level error taxonomy. Timeouts and
//!   authentication failures are distinct conditions; server-supplied
//!   messages are surfaced verbatim.

pub mod envelope;
pub mod error;
pub mod transport;

mod analytics;
mod client;
mod dashboard;
mod festivals;
mod sns;
mod zones;

pub use client::{ApiClient, Interceptor, bearer_token};
pub use error::Error;
pub use transport::TransportConfig;
