// ── Analytics domain types ──
//
// Server-computed aggregates. These are read-only and the backend's
// shapes for them are only loosely documented, so every field is
// tolerant: options and defaults throughout. The festival report and
// dashboard snapshots stay fully opaque (`serde_json::Value`) — they
// are displayed, never interpreted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One zone's congestion reading from the realtime congestion feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CongestionPoint {
    #[serde(default)]
    pub zone_id: Option<String>,
    #[serde(default)]
    pub zone_name: Option<String>,
    /// 0.0–1.0 occupancy ratio when the backend reports one.
    #[serde(default)]
    pub occupancy: Option<f64>,
    #[serde(default)]
    pub congestion_level: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One social-media post captured for a festival.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnsPost {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub festival_id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Per-festival sentiment rollup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub negative: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub total: u64,
}
