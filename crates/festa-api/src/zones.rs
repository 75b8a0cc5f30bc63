// Zone endpoints
//
// Zones are nested under their owning festival:
// `/festivals/{festivalId}/zones[...]`.

use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;

impl ApiClient {
    /// `GET /festivals/{festivalId}/zones`
    pub async fn list_zones(&self, festival_id: &str) -> Result<Value, Error> {
        debug!(festival_id, "listing zones");
        self.get(&format!("festivals/{festival_id}/zones")).await
    }

    /// `GET /festivals/{festivalId}/zones/{zoneId}`
    pub async fn get_zone(&self, festival_id: &str, zone_id: &str) -> Result<Value, Error> {
        debug!(festival_id, zone_id, "fetching zone");
        self.get(&format!("festivals/{festival_id}/zones/{zone_id}"))
            .await
    }

    /// `POST /festivals/{festivalId}/zones`
    pub async fn create_zone(&self, festival_id: &str, zone: &Value) -> Result<Value, Error> {
        debug!(festival_id, "creating zone");
        self.post(&format!("festivals/{festival_id}/zones"), zone)
            .await
    }

    /// `PUT /festivals/{festivalId}/zones/{zoneId}`
    pub async fn update_zone(
        &self,
        festival_id: &str,
        zone_id: &str,
        zone: &Value,
    ) -> Result<Value, Error> {
        debug!(festival_id, zone_id, "updating zone");
        self.put(&format!("festivals/{festival_id}/zones/{zone_id}"), zone)
            .await
    }

    /// `DELETE /festivals/{festivalId}/zones/{zoneId}`
    pub async fn delete_zone(&self, festival_id: &str, zone_id: &str) -> Result<Value, Error> {
        debug!(festival_id, zone_id, "deleting zone");
        self.delete(&format!("festivals/{festival_id}/zones/{zone_id}"))
            .await
    }

    /// `PATCH /festivals/{festivalId}/zones/{zoneId}/realtime`
    pub async fn update_zone_realtime(
        &self,
        festival_id: &str,
        zone_id: &str,
        body: &Value,
    ) -> Result<Value, Error> {
        debug!(festival_id, zone_id, "updating zone realtime data");
        self.patch(
            &format!("festivals/{festival_id}/zones/{zone_id}/realtime"),
            body,
        )
        .await
    }

    /// `GET /festivals/{festivalId}/zones/congestion/{high|low}`
    pub async fn list_zones_by_congestion(
        &self,
        festival_id: &str,
        level: &str,
    ) -> Result<Value, Error> {
        debug!(festival_id, level, "listing zones by congestion");
        self.get(&format!("festivals/{festival_id}/zones/congestion/{level}"))
            .await
    }

    /// `GET /festivals/{festivalId}/zones/type/{type}`
    pub async fn list_zones_by_type(
        &self,
        festival_id: &str,
        zone_type: &str,
    ) -> Result<Value, Error> {
        debug!(festival_id, zone_type, "listing zones by type");
        self.get(&format!("festivals/{festival_id}/zones/type/{zone_type}"))
            .await
    }

    /// `GET /festivals/{festivalId}/zones/statistics`
    pub async fn get_zone_statistics(&self, festival_id: &str) -> Result<Value, Error> {
        debug!(festival_id, "fetching zone statistics");
        self.get(&format!("festivals/{festival_id}/zones/statistics"))
            .await
    }
}
