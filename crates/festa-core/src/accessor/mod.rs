// ── Stateful resource accessors ──
//
// One accessor per backend resource family. Each privately owns its
// slice of view-state; coordination between a selected festival and its
// children happens only through the scoping id, never through shared
// mutable state.

mod analytics;
mod dashboard;
mod festivals;
mod sns;
mod zones;

pub use analytics::{AnalyticsAccessor, PollHandle};
pub use dashboard::DashboardAccessor;
pub use festivals::{FestivalAccessor, FestivalFilter};
pub use sns::SnsAccessor;
pub use zones::ZoneAccessor;
