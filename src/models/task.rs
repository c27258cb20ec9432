use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A scheduled or completed care action.
///
/// `plant_id` may reference a plant that has since been removed. Orphaned
/// tasks are tolerated permanently and rendered with a placeholder label,
/// never auto-repaired or purged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub plant_id: i64,
    pub kind: TaskKind,
    pub due_date: DateTime<Utc>,
    /// Recurrence interval in days. Absent for one-off tasks.
    pub interval_days: Option<u32>,
    /// Repeat cadence chosen on manual reminder creation.
    pub repeat: Option<RepeatCadence>,
    pub completed: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// The kind of care action a task represents.
///
/// The well-known kinds come from care-guide classification; anything else
/// (e.g. "sunlight" sections) is carried verbatim as a lowercased free-form
/// label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Water,
    Fertilize,
    Prune,
    Repot,
    Other(String),
}

impl TaskKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Water => "water",
            Self::Fertilize => "fertilize",
            Self::Prune => "prune",
            Self::Repot => "repot",
            Self::Other(label) => label,
        }
    }

    /// Map a stored label back to a kind. Unknown labels round-trip as
    /// `Other`.
    pub fn from_label(s: &str) -> Self {
        match s {
            "water" => Self::Water,
            "fertilize" => Self::Fertilize,
            "prune" => Self::Prune,
            "repot" => Self::Repot,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Serialize for TaskKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_label(&s))
    }
}

/// Repeat cadence label offered on manual reminder creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RepeatCadence {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl RepeatCadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "biweekly" => Some(Self::Biweekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// Input for creating a task, either as a manual reminder or from the
/// care-task generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskInput {
    pub plant_id: i64,
    pub kind: TaskKind,
    pub due_date: DateTime<Utc>,
    pub interval_days: Option<u32>,
    pub repeat: Option<RepeatCadence>,
    #[serde(default)]
    pub notes: String,
}

/// Input for updating a task. All fields are optional for partial updates.
///
/// Setting `completed` to `true` triggers a care-streak update; editing the
/// due date or interval alone does not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub due_date: Option<DateTime<Utc>>,
    pub interval_days: Option<u32>,
    pub repeat: Option<RepeatCadence>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
}

/// A task joined with the resolved-or-placeholder name of its owning plant.
///
/// Read sites never fail on a missing plant; they show `"Unknown Plant"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub plant_name: String,
}
