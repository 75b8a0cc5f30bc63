// ── SNS feedback accessor (selection-scoped) ──
//
// Raw social-media feedback for the selected festival plus the derived
// sentiment summary. Scoping follows the zone accessor's contract: no
// selected festival means every operation is a no-op.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::debug;

use festa_api::{ApiClient, envelope};

use crate::error::CoreError;
use crate::model::{SentimentSummary, SnsPost};
use crate::state::{ListCell, RecordCell, RecordState, ResourceState};

/// Stateful accessor for SNS feedback and sentiment.
pub struct SnsAccessor {
    api: Arc<ApiClient>,
    feedback: ListCell<SnsPost>,
    sentiment: RecordCell<SentimentSummary>,
    festival_id: Mutex<Option<String>>,
}

impl SnsAccessor {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            feedback: ListCell::new(),
            sentiment: RecordCell::new(),
            festival_id: Mutex::new(None),
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn state(&self) -> Arc<ResourceState<SnsPost>> {
        self.feedback.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ResourceState<SnsPost>>> {
        self.feedback.subscribe()
    }

    pub fn sentiment(&self) -> Arc<RecordState<SentimentSummary>> {
        self.sentiment.snapshot()
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Change the scoping festival; discards state and refetches both
    /// the feedback list and the sentiment summary under the new id.
    pub async fn set_festival(&self, festival_id: Option<String>) {
        {
            let mut current = self.festival_id.lock().expect("festival id lock");
            if *current == festival_id {
                return;
            }
            debug!(from = ?*current, to = ?festival_id, "SNS scope changed");
            *current = festival_id.clone();
        }

        self.feedback.clear();
        self.sentiment.clear();

        if festival_id.is_some() {
            self.fetch_feedback().await;
            self.fetch_sentiment().await;
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch the feedback list for the selected festival.
    pub async fn fetch_feedback(&self) {
        if self.scope().is_none() {
            return;
        }
        // Token first, scope second: a selection change between the two
        // invalidates this fetch's settlement.
        let token = self.feedback.begin_fetch();
        let Some(festival_id) = self.scope() else {
            self.feedback.settle_items(token, Vec::new());
            return;
        };
        match self.api.list_sns_feedback_for_festival(&festival_id).await {
            Ok(body) => self.feedback.settle_items(token, envelope::records(&body)),
            Err(e) => self
                .feedback
                .settle_fetch_error(token, CoreError::from(e).to_string()),
        }
    }

    /// Fetch the sentiment summary for the selected festival.
    pub async fn fetch_sentiment(&self) {
        if self.scope().is_none() {
            return;
        }
        let token = self.sentiment.begin_fetch();
        let Some(festival_id) = self.scope() else {
            self.sentiment.settle_record(token, None);
            return;
        };
        match self.api.get_sentiment_analysis(&festival_id).await {
            Ok(body) => self.sentiment.settle_record(token, envelope::record(&body)),
            Err(e) => self
                .sentiment
                .settle_error(token, CoreError::from(e).to_string()),
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Submit a feedback record, then resynchronize the list.
    pub async fn create(&self, post: &SnsPost) -> Result<(), CoreError> {
        let body = serde_json::to_value(post)
            .map_err(|e| CoreError::Internal(format!("feedback serialization failed: {e}")))?;

        self.feedback.begin_mutation();
        match self.api.create_sns_feedback(&body).await {
            Ok(_) => {
                if self.scope().is_some() {
                    self.fetch_feedback().await;
                } else {
                    self.feedback.end_mutation();
                }
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.feedback.settle_mutation_error(err.to_string());
                Err(err)
            }
        }
    }

    fn scope(&self) -> Option<String> {
        self.festival_id.lock().expect("festival id lock").clone()
    }
}
