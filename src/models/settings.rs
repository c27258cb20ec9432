use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Global user preferences. A singleton, mutated via partial merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub notifications: bool,
    pub dark_mode: bool,
    pub water_reminders: bool,
    /// Day the current care streak started, if the user ever recorded one.
    pub care_streak_start: Option<NaiveDate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            dark_mode: false,
            water_reminders: true,
            care_streak_start: None,
        }
    }
}

/// Partial update for settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettingsInput {
    pub notifications: Option<bool>,
    pub dark_mode: Option<bool>,
    pub water_reminders: Option<bool>,
    pub care_streak_start: Option<NaiveDate>,
}
