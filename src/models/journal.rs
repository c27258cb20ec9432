use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A diary record, optionally scoped to a plant.
///
/// Entries are kept newest-first; the store inserts at the head of the
/// collection. `plant_id = None` marks a general entry. Like tasks, entries
/// may outlive the plant they reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub plant_id: Option<i64>,
    pub content: String,
    /// Photo references, in the order the user attached them.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJournalInput {
    pub plant_id: Option<i64>,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Input for editing a journal entry. All fields are optional for partial
/// updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJournalInput {
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
}
