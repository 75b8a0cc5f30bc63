// ── Analytics accessor (poll-driven) ──
//
// The congestion and SNS-sentiment aggregates are re-fetched on a fixed
// cadence while a festival is being watched. Whoever starts the poll
// owns its cancellation: `watch_festival` returns a `PollHandle` that
// stops the timer on `stop()` and on drop, so replacing the handle on a
// selection change leaves exactly one active timer. The result report
// is fetched once on demand, never polled.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use festa_api::{ApiClient, envelope};

use crate::error::CoreError;
use crate::model::{CongestionPoint, SnsPost};
use crate::state::{ListCell, RecordCell, RecordState, ResourceState};

/// Ownership of a running analytics poll.
///
/// Cancelling is idempotent; dropping the handle cancels too. Leaking a
/// timer that keeps firing against a stale festival id is a correctness
/// bug, not a cosmetic one.
pub struct PollHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop the poll and wait for the task to wind down.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        let _ = (&mut self.task).await;
    }

    /// True while the poll task is still running.
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Stateful accessor for the read-only analytics aggregates of a
/// festival.
pub struct AnalyticsAccessor {
    api: Arc<ApiClient>,
    poll_interval: Duration,
    congestion: ListCell<CongestionPoint>,
    sns: ListCell<SnsPost>,
    report: RecordCell<Value>,
}

impl AnalyticsAccessor {
    pub fn new(api: Arc<ApiClient>, poll_interval: Duration) -> Self {
        Self {
            api,
            poll_interval,
            congestion: ListCell::new(),
            sns: ListCell::new(),
            report: RecordCell::new(),
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    pub fn congestion(&self) -> Arc<ResourceState<CongestionPoint>> {
        self.congestion.snapshot()
    }

    pub fn subscribe_congestion(&self) -> watch::Receiver<Arc<ResourceState<CongestionPoint>>> {
        self.congestion.subscribe()
    }

    pub fn sns(&self) -> Arc<ResourceState<SnsPost>> {
        self.sns.snapshot()
    }

    pub fn subscribe_sns(&self) -> watch::Receiver<Arc<ResourceState<SnsPost>>> {
        self.sns.subscribe()
    }

    pub fn report(&self) -> Arc<RecordState<Value>> {
        self.report.snapshot()
    }

    // ── Polling ──────────────────────────────────────────────────────

    /// Start watching a festival: fetch the congestion and SNS aggregates
    /// immediately, then re-issue both on the configured cadence until
    /// the returned handle is stopped or dropped.
    ///
    /// Starting a poll discards state from any previously watched
    /// festival and invalidates its in-flight fetches.
    pub fn watch_festival(self: Arc<Self>, festival_id: impl Into<String>) -> PollHandle {
        let festival_id = festival_id.into();
        let accessor = self;
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        accessor.congestion.clear();
        accessor.sns.clear();

        let task = tokio::spawn(async move {
            poll_task(accessor, festival_id, task_cancel).await;
        });

        PollHandle { cancel, task }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch the realtime congestion aggregate once.
    pub async fn fetch_congestion(&self, festival_id: &str) {
        let token = self.congestion.begin_fetch();
        match self.api.get_congestion(festival_id).await {
            Ok(body) => self.congestion.settle_items(token, envelope::records(&body)),
            Err(e) => self
                .congestion
                .settle_fetch_error(token, CoreError::from(e).to_string()),
        }
    }

    /// Fetch the SNS sentiment aggregate once.
    pub async fn fetch_sns(&self, festival_id: &str) {
        let token = self.sns.begin_fetch();
        match self.api.get_sns_feedback_analytics(festival_id).await {
            Ok(body) => self.sns.settle_items(token, envelope::records(&body)),
            Err(e) => self
                .sns
                .settle_fetch_error(token, CoreError::from(e).to_string()),
        }
    }

    /// Fetch the result report for a festival. On demand only — the
    /// report is expensive server-side and is never polled.
    pub async fn fetch_report(&self, festival_id: &str) {
        let token = self.report.begin_fetch();
        match self.api.get_festival_report(festival_id).await {
            Ok(body) => {
                let report = match body {
                    Value::Null => None,
                    other => Some(other),
                };
                self.report.settle_record(token, report);
            }
            Err(e) => self
                .report
                .settle_error(token, CoreError::from(e).to_string()),
        }
    }

    /// Request AI planning recommendations for a festival draft. The
    /// result goes straight back to the caller; nothing is cached.
    pub async fn planning_recommendations(&self, festival: &Value) -> Result<Value, CoreError> {
        Ok(self.api.get_planning_recommendations(festival).await?)
    }
}

/// The poll loop: immediate fetch pair, then one pair per tick.
async fn poll_task(accessor: Arc<AnalyticsAccessor>, festival_id: String, cancel: CancellationToken) {
    debug!(festival_id, "analytics poll started");

    accessor.fetch_congestion(&festival_id).await;
    accessor.fetch_sns(&festival_id).await;

    let mut interval = tokio::time::interval(accessor.poll_interval);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                debug!(festival_id, "analytics poll tick");
                accessor.fetch_congestion(&festival_id).await;
                accessor.fetch_sns(&festival_id).await;
            }
        }
    }

    debug!(festival_id, "analytics poll stopped");
}
