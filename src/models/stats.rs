use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Derived counters over the other collections.
///
/// `plant_count` and `journal_count` are recomputed by a full recount after
/// every relevant mutation. The care streak is maintained exclusively by the
/// scheduler's streak update; nothing else writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub plant_count: u32,
    pub journal_count: u32,
    pub care_streak: u32,
    /// Local calendar day of the most recent completed care action.
    pub last_care_date: Option<NaiveDate>,
}
