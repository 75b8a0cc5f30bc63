//! Client-side data synchronization layer for the festival admin
//! console.
//!
//! This crate sits between `festa-api` (transport + resource clients)
//! and the presentation layer (forms, tables, dashboards), and owns the
//! only part of the console with real invariants: keeping local
//! view-state consistent with server state.
//!
//! - **Accessors** ([`accessor`]) — one stateful unit per resource
//!   family (festivals, zones, analytics, dashboard, SNS feedback),
//!   each owning an in-memory collection or record, a loading flag, and
//!   an error value behind `watch`-channel snapshots. Mutations
//!   reconcile with server truth: create resynchronizes the whole
//!   collection, update/delete patch the matching record by id.
//! - **Selection scoping** — the [`ZoneAccessor`] and [`SnsAccessor`]
//!   are parameterized by the selected festival id; a selection change
//!   discards the old collection and invalidates in-flight fetches, so
//!   stale children never leak across festivals.
//! - **Polling** — the [`AnalyticsAccessor`] re-issues the congestion
//!   and sentiment queries on a fixed cadence behind an explicitly
//!   cancellable [`PollHandle`].
//! - **Stale-response sequencing** ([`state`]) — fetches carry sequence
//!   tokens; an older in-flight fetch can never overwrite a newer one's
//!   result.
//! - **Domain model** ([`model`]) — `Festival`, `Zone`, and the
//!   tolerant analytics types, with input-time validation on drafts.

pub mod accessor;
pub mod config;
pub mod error;
pub mod model;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use accessor::{
    AnalyticsAccessor, DashboardAccessor, FestivalAccessor, FestivalFilter, PollHandle,
    SnsAccessor, ZoneAccessor,
};
pub use config::ConsoleConfig;
pub use error::CoreError;
pub use state::{RecordState, ResourceState};

pub use model::{
    CongestionLevel, CongestionPoint, Festival, FestivalDraft, FestivalStatistics, FestivalStatus,
    SentimentSummary, SnsPost, Zone, ZoneDraft, ZoneType,
};

use std::sync::Arc;

use festa_api::ApiClient;

/// Bundle of all five accessors wired to one shared [`ApiClient`].
///
/// Convenience for consumers that want the whole data layer constructed
/// in one call; each accessor still owns its state independently.
pub struct Console {
    pub festivals: Arc<FestivalAccessor>,
    pub zones: Arc<ZoneAccessor>,
    pub analytics: Arc<AnalyticsAccessor>,
    pub dashboard: Arc<DashboardAccessor>,
    pub sns: Arc<SnsAccessor>,
}

impl Console {
    /// Build the full data layer from a configuration.
    pub fn new(config: &ConsoleConfig) -> Result<Self, CoreError> {
        let api = Arc::new(
            ApiClient::new(&config.transport())
                .map_err(|e| CoreError::Internal(format!("failed to build HTTP client: {e}")))?,
        );
        Ok(Self::with_client(api, config))
    }

    /// Build the full data layer around an existing client (tests,
    /// custom interceptors).
    pub fn with_client(api: Arc<ApiClient>, config: &ConsoleConfig) -> Self {
        Self {
            festivals: Arc::new(FestivalAccessor::new(Arc::clone(&api))),
            zones: Arc::new(ZoneAccessor::new(Arc::clone(&api))),
            analytics: Arc::new(AnalyticsAccessor::new(
                Arc::clone(&api),
                config.analytics_poll_interval,
            )),
            dashboard: Arc::new(DashboardAccessor::new(Arc::clone(&api))),
            sns: Arc::new(SnsAccessor::new(api)),
        }
    }
}
