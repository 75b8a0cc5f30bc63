// Analytics endpoints
//
// Read-only aggregates computed server-side (congestion, SNS sentiment,
// result reports) plus the AI planning-recommendation query. All of it
// is consumed as an opaque data source.

use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

impl ApiClient {
    /// `GET /festivals/{festivalId}/analytics/congestion`
    pub async fn get_congestion(&self, festival_id: &str) -> Result<Value, Error> {
        debug!(festival_id, "fetching congestion analytics");
        self.get(&format!("festivals/{festival_id}/analytics/congestion"))
            .await
    }

    /// `GET /festivals/{festivalId}/analytics/sns-feedback`
    pub async fn get_sns_feedback_analytics(&self, festival_id: &str) -> Result<Value, Error> {
        debug!(festival_id, "fetching SNS feedback analytics");
        self.get(&format!("festivals/{festival_id}/analytics/sns-feedback"))
            .await
    }

    /// `GET /festivals/{festivalId}/analytics/report`
    pub async fn get_festival_report(&self, festival_id: &str) -> Result<Value, Error> {
        debug!(festival_id, "fetching festival report");
        self.get(&format!("festivals/{festival_id}/analytics/report"))
            .await
    }

    /// `POST /analytics/planning-recommendations`
    pub async fn get_planning_recommendations(&self, festival: &Value) -> Result<Value, Error> {
        debug!("requesting planning recommendations");
        self.post("analytics/planning-recommendations", festival)
            .await
    }
}
