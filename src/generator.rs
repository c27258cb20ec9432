//! Derives recurring care tasks from free-text care-guide sections.
//!
//! A care guide arrives as titled sections ("Watering", "Pruning", ...) with
//! prose descriptions. The section label is classified into a task kind and
//! the description scanned for an "every N \<unit\>" recurrence pattern.

use anyhow::Result;
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::models::{CreateTaskInput, Task, TaskKind};
use crate::store::Store;

/// One titled section of a catalog care guide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareSection {
    #[serde(rename = "type")]
    pub section_type: String,
    #[serde(default)]
    pub description: String,
}

/// Day-conversion constants for recurrence patterns. These are policy, not
/// calendar arithmetic: a month is always 30 days and a year always 365.
pub const DAYS_PER_WEEK: u32 = 7;
pub const DAYS_PER_MONTH: u32 = 30;
pub const DAYS_PER_YEAR: u32 = 365;

static EVERY_N_DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"every (\d+) day").expect("hardcoded regex"));
static EVERY_N_DAY_WEEK_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"every (\d+) (day|week|month)").expect("hardcoded regex"));
static EVERY_N_MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"every (\d+) (year|month)").expect("hardcoded regex"));

/// Classify a care-guide section by its type label.
///
/// Case-insensitive substring match, in priority order: water, fertilize,
/// prune, repot. Anything else becomes a free-form kind carrying the
/// lowercased label verbatim.
pub fn classify_section(label: &str) -> TaskKind {
    let lower = label.to_lowercase();
    if lower.contains("water") {
        TaskKind::Water
    } else if lower.contains("fertiliz") {
        TaskKind::Fertilize
    } else if lower.contains("prun") {
        TaskKind::Prune
    } else if lower.contains("repot") {
        TaskKind::Repot
    } else {
        TaskKind::Other(lower)
    }
}

/// Extract a recurrence interval in days from a section description.
///
/// Which units are recognized depends on the kind: watering guides speak in
/// days, fertilizing and pruning in days/weeks/months, repotting in
/// months/years. Free-form kinds never recur. `None` means the task is a
/// one-off.
pub fn parse_interval(kind: &TaskKind, description: &str) -> Option<u32> {
    let desc = description.to_lowercase();
    match kind {
        TaskKind::Water => {
            let caps = EVERY_N_DAYS.captures(&desc)?;
            caps[1].parse().ok()
        }
        TaskKind::Fertilize | TaskKind::Prune => {
            let caps = EVERY_N_DAY_WEEK_MONTH.captures(&desc)?;
            let n: u32 = caps[1].parse().ok()?;
            Some(match &caps[2] {
                "day" => n,
                "week" => n * DAYS_PER_WEEK,
                _ => n * DAYS_PER_MONTH,
            })
        }
        TaskKind::Repot => {
            let caps = EVERY_N_MONTH_YEAR.captures(&desc)?;
            let n: u32 = caps[1].parse().ok()?;
            Some(match &caps[2] {
                "month" => n * DAYS_PER_MONTH,
                _ => n * DAYS_PER_YEAR,
            })
        }
        TaskKind::Other(_) => None,
    }
}

impl Store {
    /// Generate care tasks for a plant from its care-guide sections.
    ///
    /// At most one generated task per (plant, kind): a section whose kind
    /// already has any task for this plant is skipped, completed or not,
    /// including tasks created earlier in the same run. Generated tasks are
    /// due immediately and carry the section description as notes.
    pub fn generate_care_tasks(
        &self,
        plant_id: i64,
        sections: &[CareSection],
    ) -> Result<Vec<Task>> {
        let mut created = Vec::new();

        for section in sections {
            let kind = classify_section(&section.section_type);
            let exists = self
                .all_tasks()
                .iter()
                .any(|t| t.plant_id == plant_id && t.kind == kind);
            if exists {
                continue;
            }

            let interval = parse_interval(&kind, &section.description);
            let task = self.add_task(CreateTaskInput {
                plant_id,
                kind,
                due_date: Utc::now(),
                interval_days: interval,
                repeat: None,
                notes: section.description.clone(),
            })?;
            created.push(task);
        }

        Ok(created)
    }
}
