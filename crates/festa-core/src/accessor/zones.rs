// ── Zone accessor (selection-scoped) ──
//
// Parameterized by the currently selected festival id, which may be
// absent. With no festival selected every operation is a no-op:
// resolves immediately, touches nothing, issues no network call.
//
// Changing the selection discards the previous collection and
// invalidates every in-flight fetch before refetching under the new
// id — zones from festival A must never be visible, even transiently,
// under festival B.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::debug;

use festa_api::{ApiClient, envelope};

use crate::error::CoreError;
use crate::model::{CongestionLevel, Zone, ZoneDraft, ZoneType};
use crate::state::{ListCell, RecordCell, RecordState, ResourceState};

/// Stateful accessor for the zones of the selected festival.
pub struct ZoneAccessor {
    api: Arc<ApiClient>,
    zones: ListCell<Zone>,
    statistics: RecordCell<serde_json::Value>,
    festival_id: Mutex<Option<String>>,
}

impl ZoneAccessor {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            zones: ListCell::new(),
            statistics: RecordCell::new(),
            festival_id: Mutex::new(None),
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn state(&self) -> Arc<ResourceState<Zone>> {
        self.zones.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ResourceState<Zone>>> {
        self.zones.subscribe()
    }

    pub fn statistics(&self) -> Arc<RecordState<serde_json::Value>> {
        self.statistics.snapshot()
    }

    /// The currently selected festival id, if any.
    pub fn festival(&self) -> Option<String> {
        self.scope()
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Change the scoping festival. A no-op when the id is unchanged.
    /// Otherwise the previous collection is discarded (and in-flight
    /// fetches invalidated) before a fresh fetch under the new id.
    pub async fn set_festival(&self, festival_id: Option<String>) {
        {
            let mut current = self.festival_id.lock().expect("festival id lock");
            if *current == festival_id {
                return;
            }
            debug!(from = ?*current, to = ?festival_id, "zone scope changed");
            *current = festival_id.clone();
        }

        self.zones.clear();
        self.statistics.clear();

        if festival_id.is_some() {
            self.fetch().await;
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch all zones for the selected festival.
    pub async fn fetch(&self) {
        if self.scope().is_none() {
            return;
        }
        // Token first, scope second: if the selection changes between
        // the two, this fetch's settlement is already invalidated.
        let token = self.zones.begin_fetch();
        let Some(festival_id) = self.scope() else {
            self.zones.settle_items(token, Vec::new());
            return;
        };
        match self.api.list_zones(&festival_id).await {
            Ok(body) => {
                let items: Vec<Zone> = envelope::records(&body);
                debug!(festival_id, count = items.len(), "zone list refreshed");
                self.zones.settle_items(token, items);
            }
            Err(e) => {
                self.zones
                    .settle_fetch_error(token, CoreError::from(e).to_string());
            }
        }
    }

    /// Fetch only zones of the given type (filtered list view).
    pub async fn fetch_by_type(&self, zone_type: ZoneType) {
        if self.scope().is_none() {
            return;
        }
        let token = self.zones.begin_fetch();
        let Some(festival_id) = self.scope() else {
            self.zones.settle_items(token, Vec::new());
            return;
        };
        match self
            .api
            .list_zones_by_type(&festival_id, zone_type.as_str())
            .await
        {
            Ok(body) => self.zones.settle_items(token, envelope::records(&body)),
            Err(e) => self
                .zones
                .settle_fetch_error(token, CoreError::from(e).to_string()),
        }
    }

    /// Fetch only zones at the given congestion level (filtered list view).
    pub async fn fetch_by_congestion(&self, level: CongestionLevel) {
        if self.scope().is_none() {
            return;
        }
        let token = self.zones.begin_fetch();
        let Some(festival_id) = self.scope() else {
            self.zones.settle_items(token, Vec::new());
            return;
        };
        match self
            .api
            .list_zones_by_congestion(&festival_id, level.as_str())
            .await
        {
            Ok(body) => self.zones.settle_items(token, envelope::records(&body)),
            Err(e) => self
                .zones
                .settle_fetch_error(token, CoreError::from(e).to_string()),
        }
    }

    /// Fetch the per-festival zone statistics aggregate.
    pub async fn fetch_statistics(&self) {
        if self.scope().is_none() {
            return;
        }
        let token = self.statistics.begin_fetch();
        let Some(festival_id) = self.scope() else {
            self.statistics.settle_record(token, None);
            return;
        };
        match self.api.get_zone_statistics(&festival_id).await {
            Ok(body) => self.statistics.settle_record(token, envelope::record(&body)),
            Err(e) => self
                .statistics
                .settle_error(token, CoreError::from(e).to_string()),
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a zone under the selected festival, then unconditionally
    /// resynchronize the collection.
    pub async fn create(&self, draft: &ZoneDraft) -> Result<(), CoreError> {
        let Some(festival_id) = self.scope() else {
            return Ok(());
        };
        draft.validate()?;
        let body = serde_json::to_value(draft)
            .map_err(|e| CoreError::Internal(format!("draft serialization failed: {e}")))?;

        self.zones.begin_mutation();
        match self.api.create_zone(&festival_id, &body).await {
            Ok(_) => {
                self.fetch().await;
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.zones.settle_mutation_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Update a zone, replacing the matching local record by id.
    pub async fn update(&self, zone_id: &str, draft: &ZoneDraft) -> Result<(), CoreError> {
        let Some(festival_id) = self.scope() else {
            return Ok(());
        };
        draft.validate()?;
        let body = serde_json::to_value(draft)
            .map_err(|e| CoreError::Internal(format!("draft serialization failed: {e}")))?;

        self.zones.begin_mutation();
        match self.api.update_zone(&festival_id, zone_id, &body).await {
            Ok(response) => {
                self.apply_updated(zone_id, envelope::record(&response)).await;
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.zones.settle_mutation_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Push a realtime occupancy reading for a zone
    /// (`PATCH .../zones/{zoneId}/realtime`).
    pub async fn update_realtime(
        &self,
        zone_id: &str,
        reading: &serde_json::Value,
    ) -> Result<(), CoreError> {
        let Some(festival_id) = self.scope() else {
            return Ok(());
        };
        self.zones.begin_mutation();
        match self
            .api
            .update_zone_realtime(&festival_id, zone_id, reading)
            .await
        {
            Ok(response) => {
                self.apply_updated(zone_id, envelope::record(&response)).await;
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.zones.settle_mutation_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a zone, removing the matching local record.
    pub async fn delete(&self, zone_id: &str) -> Result<(), CoreError> {
        let Some(festival_id) = self.scope() else {
            return Ok(());
        };
        self.zones.begin_mutation();
        match self.api.delete_zone(&festival_id, zone_id).await {
            Ok(_) => {
                self.zones.modify(|items| items.retain(|z| z.id != zone_id));
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.zones.settle_mutation_error(err.to_string());
                Err(err)
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn scope(&self) -> Option<String> {
        self.festival_id.lock().expect("festival id lock").clone()
    }

    async fn apply_updated(&self, zone_id: &str, updated: Option<Zone>) {
        match updated {
            Some(zone) => {
                self.zones.modify(|items| {
                    if let Some(slot) = items.iter_mut().find(|z| z.id == zone_id) {
                        *slot = zone;
                    }
                });
            }
            None => {
                debug!(zone_id, "update response unusable as a record; resyncing");
                self.fetch().await;
            }
        }
    }
}
