// ── Domain model ──

mod analytics;
mod festival;
mod zone;

pub use analytics::{CongestionPoint, SentimentSummary, SnsPost};
pub use festival::{Festival, FestivalDraft, FestivalStatistics, FestivalStatus};
pub use zone::{CongestionLevel, Zone, ZoneDraft, ZoneType};
