// ── Festival accessor ──
//
// Owns the in-memory festival collection and its reconciliation policy
// against server state. Reads swallow failures into the cell's error
// value; mutations additionally re-raise to the caller so a form can
// stay open on failure.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::watch;
use tracing::debug;

use festa_api::{ApiClient, envelope};

use crate::error::CoreError;
use crate::model::{Festival, FestivalDraft, FestivalStatistics, FestivalStatus};
use crate::state::{ListCell, RecordCell, RecordState, ResourceState};

/// Which festival list view to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FestivalFilter {
    #[default]
    All,
    Running,
    Upcoming,
}

/// Stateful accessor for the festival collection.
pub struct FestivalAccessor {
    api: Arc<ApiClient>,
    festivals: ListCell<Festival>,
    statistics: RecordCell<FestivalStatistics>,
}

impl FestivalAccessor {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            festivals: ListCell::new(),
            statistics: RecordCell::new(),
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn state(&self) -> Arc<ResourceState<Festival>> {
        self.festivals.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ResourceState<Festival>>> {
        self.festivals.subscribe()
    }

    pub fn statistics(&self) -> Arc<RecordState<FestivalStatistics>> {
        self.statistics.snapshot()
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch all festivals, replacing the local collection with whatever
    /// the server returns. On failure the collection is reset to empty —
    /// never show possibly-wrong data.
    pub async fn fetch(&self) {
        self.fetch_filtered(FestivalFilter::All).await;
    }

    /// Fetch a filtered list view (all / running / upcoming).
    pub async fn fetch_filtered(&self, filter: FestivalFilter) {
        let token = self.festivals.begin_fetch();
        let result = match filter {
            FestivalFilter::All => self.api.list_festivals().await,
            FestivalFilter::Running => self.api.list_running_festivals().await,
            FestivalFilter::Upcoming => self.api.list_upcoming_festivals().await,
        };
        match result {
            Ok(body) => {
                let items: Vec<Festival> = envelope::records(&body);
                debug!(count = items.len(), ?filter, "festival list refreshed");
                self.festivals.settle_items(token, items);
            }
            Err(e) => {
                self.festivals
                    .settle_fetch_error(token, CoreError::from(e).to_string());
            }
        }
    }

    /// Fetch the aggregate festival counts.
    pub async fn fetch_statistics(&self) {
        let token = self.statistics.begin_fetch();
        match self.api.get_festival_statistics().await {
            Ok(body) => {
                self.statistics.settle_record(token, envelope::record(&body));
            }
            Err(e) => {
                self.statistics
                    .settle_error(token, CoreError::from(e).to_string());
            }
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a festival, then unconditionally resynchronize the whole
    /// collection. The create response is not trusted as the sole source
    /// of truth — the backend does not guarantee create responses are
    /// shaped like list-query records.
    pub async fn create(&self, draft: &FestivalDraft) -> Result<(), CoreError> {
        draft.validate()?;
        let body = serde_json::to_value(draft)
            .map_err(|e| CoreError::Internal(format!("draft serialization failed: {e}")))?;

        self.festivals.begin_mutation();
        match self.api.create_festival(&body).await {
            Ok(_) => {
                // Refetch only after the create's success is observed.
                self.fetch().await;
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.festivals.settle_mutation_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Update a festival, replacing the matching local record by id.
    /// A record not found locally is silently ignored — no insert on
    /// miss. If the response shape is unusable, resynchronize instead.
    pub async fn update(&self, id: &str, draft: &FestivalDraft) -> Result<(), CoreError> {
        draft.validate()?;
        let body = serde_json::to_value(draft)
            .map_err(|e| CoreError::Internal(format!("draft serialization failed: {e}")))?;

        self.festivals.begin_mutation();
        match self.api.update_festival(id, &body).await {
            Ok(response) => {
                self.apply_updated(id, envelope::record(&response)).await;
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.festivals.settle_mutation_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Move a festival through its lifecycle (`PATCH /{id}/status`).
    pub async fn update_status(&self, id: &str, status: FestivalStatus) -> Result<(), CoreError> {
        self.festivals.begin_mutation();
        match self
            .api
            .update_festival_status(id, &json!({ "status": status }))
            .await
        {
            Ok(response) => {
                self.apply_updated(id, envelope::record(&response)).await;
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.festivals.settle_mutation_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Record post-festival results (`PATCH /{id}/results`).
    pub async fn record_results(
        &self,
        id: &str,
        results: &serde_json::Value,
    ) -> Result<(), CoreError> {
        self.festivals.begin_mutation();
        match self.api.record_festival_results(id, results).await {
            Ok(response) => {
                self.apply_updated(id, envelope::record(&response)).await;
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.festivals.settle_mutation_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a festival, removing the matching local record.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.festivals.begin_mutation();
        match self.api.delete_festival(id).await {
            Ok(_) => {
                self.festivals
                    .modify(|items| items.retain(|f| f.id.as_deref() != Some(id)));
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.festivals.settle_mutation_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Reconcile a successful update: replace the matching record in
    /// place, or fall back to a full resync when the response shape was
    /// not usable as a record.
    async fn apply_updated(&self, id: &str, updated: Option<Festival>) {
        match updated {
            Some(festival) => {
                self.festivals.modify(|items| {
                    if let Some(slot) = items.iter_mut().find(|f| f.id.as_deref() == Some(id)) {
                        *slot = festival;
                    }
                });
            }
            None => {
                debug!(id, "update response unusable as a record; resyncing");
                self.fetch().await;
            }
        }
    }
}
