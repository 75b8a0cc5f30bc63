// ── Zone domain type ──
//
// Zones belong to exactly one festival (foreign reference by id).
// The relationship is logical: zones are fetched separately and only
// attached to a festival for display.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What a zone is used for. Wire values are kebab-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneType {
    #[default]
    MainStage,
    FoodCourt,
    Merchandise,
    Vip,
    Parking,
}

impl ZoneType {
    /// The wire/path segment for this type (e.g. `"main-stage"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MainStage => "main-stage",
            Self::FoodCourt => "food-court",
            Self::Merchandise => "merchandise",
            Self::Vip => "vip",
            Self::Parking => "parking",
        }
    }
}

/// A festival zone as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub festival_id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub zone_type: ZoneType,
    pub capacity: u32,
    /// Optional free text, `"lat, lng"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Input for creating or updating a zone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    pub capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ZoneDraft {
    /// Check the draft's invariants: non-empty name, positive capacity.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "zone name must not be empty".into(),
            });
        }
        if self.capacity == 0 {
            return Err(CoreError::ValidationFailed {
                message: "zone capacity must be a positive integer".into(),
            });
        }
        Ok(())
    }
}

/// Congestion filter for `GET .../zones/congestion/{level}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CongestionLevel {
    High,
    Low,
}

impl CongestionLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}
