// SNS feedback endpoints
//
// Raw social-media feedback records and the per-festival sentiment
// summary derived from them.

use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

impl ApiClient {
    /// `GET /sns-feedback`
    pub async fn list_sns_feedback(&self) -> Result<Value, Error> {
        debug!("listing SNS feedback");
        self.get("sns-feedback").await
    }

    /// `POST /sns-feedback`
    pub async fn create_sns_feedback(&self, feedback: &Value) -> Result<Value, Error> {
        debug!("creating SNS feedback");
        self.post("sns-feedback", feedback).await
    }

    /// `GET /sns-feedback/festival/{festivalId}`
    pub async fn list_sns_feedback_for_festival(&self, festival_id: &str) -> Result<Value, Error> {
        debug!(festival_id, "listing SNS feedback for festival");
        self.get(&format!("sns-feedback/festival/{festival_id}"))
            .await
    }

    /// `GET /sns-feedback/festival/{festivalId}/sentiment`
    pub async fn get_sentiment_analysis(&self, festival_id: &str) -> Result<Value, Error> {
        debug!(festival_id, "fetching sentiment analysis");
        self.get(&format!("sns-feedback/festival/{festival_id}/sentiment"))
            .await
    }
}
