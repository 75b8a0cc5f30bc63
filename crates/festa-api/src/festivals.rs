// Festival endpoints
//
// Pure pass-throughs: one function, one HTTP call, no interpretation of
// the response. Shape normalization is the caller's job (`envelope`).

use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

impl ApiClient {
    /// `GET /festivals`
    pub async fn list_festivals(&self) -> Result<Value, Error> {
        debug!("listing festivals");
        self.get("festivals").await
    }

    /// `GET /festivals/{id}`
    pub async fn get_festival(&self, id: &str) -> Result<Value, Error> {
        debug!(id, "fetching festival");
        self.get(&format!("festivals/{id}")).await
    }

    /// `POST /festivals`
    pub async fn create_festival(&self, festival: &Value) -> Result<Value, Error> {
        debug!("creating festival");
        self.post("festivals", festival).await
    }

    /// `PUT /festivals/{id}`
    pub async fn update_festival(&self, id: &str, festival: &Value) -> Result<Value, Error> {
        debug!(id, "updating festival");
        self.put(&format!("festivals/{id}"), festival).await
    }

    /// `DELETE /festivals/{id}`
    pub async fn delete_festival(&self, id: &str) -> Result<Value, Error> {
        debug!(id, "deleting festival");
        self.delete(&format!("festivals/{id}")).await
    }

    /// `PATCH /festivals/{id}/status`
    pub async fn update_festival_status(&self, id: &str, body: &Value) -> Result<Value, Error> {
        debug!(id, "updating festival status");
        self.patch(&format!("festivals/{id}/status"), body).await
    }

    /// `PATCH /festivals/{id}/results`
    pub async fn record_festival_results(&self, id: &str, body: &Value) -> Result<Value, Error> {
        debug!(id, "recording festival results");
        self.patch(&format!("festivals/{id}/results"), body).await
    }

    /// `GET /festivals/running`
    pub async fn list_running_festivals(&self) -> Result<Value, Error> {
        debug!("listing running festivals");
        self.get("festivals/running").await
    }

    /// `GET /festivals/upcoming`
    pub async fn list_upcoming_festivals(&self) -> Result<Value, Error> {
        debug!("listing upcoming festivals");
        self.get("festivals/upcoming").await
    }

    /// `GET /festivals/statistics`
    pub async fn get_festival_statistics(&self) -> Result<Value, Error> {
        debug!("fetching festival statistics");
        self.get("festivals/statistics").await
    }
}
