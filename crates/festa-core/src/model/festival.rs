// ── Festival domain type ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Where a festival is in its operational lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FestivalStatus {
    #[default]
    Before,
    During,
    Ended,
    Cancelled,
}

/// A festival as the backend reports it.
///
/// `id` is server-assigned and absent until the record is persisted —
/// the client never generates identifiers for persisted entities.
/// Fields the backend may omit are tolerated with defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Festival {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Free text, e.g. "50,000명" — not a strict number.
    #[serde(default)]
    pub target_attendance: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: FestivalStatus,
}

/// Input for creating or updating a festival.
///
/// Date ordering is enforced here, at input time — the server contract
/// is not assumed to check it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FestivalDraft {
    pub name: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub target_attendance: String,
    pub description: String,
    pub status: FestivalStatus,
}

impl FestivalDraft {
    /// Check the draft's invariants: non-empty name, end date not earlier
    /// than start date.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "festival name must not be empty".into(),
            });
        }
        if self.end_date < self.start_date {
            return Err(CoreError::ValidationFailed {
                message: "end date must not be earlier than start date".into(),
            });
        }
        Ok(())
    }
}

/// Counts reported by `GET /festivals/statistics`. Tolerant of partial
/// payloads — every field defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FestivalStatistics {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub running: u64,
    #[serde(default)]
    pub upcoming: u64,
    #[serde(default)]
    pub ended: u64,
}
