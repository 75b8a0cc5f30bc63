// Dashboard endpoints

use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

impl ApiClient {
    /// `GET /dashboard/operational`
    pub async fn get_operational_dashboard(&self) -> Result<Value, Error> {
        debug!("fetching operational dashboard");
        self.get("dashboard/operational").await
    }

    /// `GET /dashboard/festival/{festivalId}`
    pub async fn get_festival_dashboard(&self, festival_id: &str) -> Result<Value, Error> {
        debug!(festival_id, "fetching festival dashboard");
        self.get(&format!("dashboard/festival/{festival_id}")).await
    }
}
