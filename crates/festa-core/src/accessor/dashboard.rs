// ── Dashboard accessor ──
//
// Two on-demand snapshots: the cross-festival operational dashboard and
// the per-festival dashboard. Both payloads stay opaque — the backend
// assembles them for display, the console never interprets them.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;

use festa_api::{ApiClient, envelope};

use crate::error::CoreError;
use crate::state::{RecordCell, RecordState};

/// Stateful accessor for the operational dashboards.
pub struct DashboardAccessor {
    api: Arc<ApiClient>,
    operational: RecordCell<Value>,
    festival: RecordCell<Value>,
}

impl DashboardAccessor {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            operational: RecordCell::new(),
            festival: RecordCell::new(),
        }
    }

    pub fn operational(&self) -> Arc<RecordState<Value>> {
        self.operational.snapshot()
    }

    pub fn subscribe_operational(&self) -> watch::Receiver<Arc<RecordState<Value>>> {
        self.operational.subscribe()
    }

    pub fn festival(&self) -> Arc<RecordState<Value>> {
        self.festival.snapshot()
    }

    /// Fetch the cross-festival operational dashboard.
    pub async fn fetch_operational(&self) {
        let token = self.operational.begin_fetch();
        match self.api.get_operational_dashboard().await {
            Ok(body) => self.operational.settle_record(token, envelope::record(&body)),
            Err(e) => self
                .operational
                .settle_error(token, CoreError::from(e).to_string()),
        }
    }

    /// Fetch the dashboard for a single festival.
    pub async fn fetch_festival(&self, festival_id: &str) {
        let token = self.festival.begin_fetch();
        match self.api.get_festival_dashboard(festival_id).await {
            Ok(body) => self.festival.settle_record(token, envelope::record(&body)),
            Err(e) => self
                .festival
                .settle_error(token, CoreError::from(e).to_string()),
        }
    }
}
