//! Care-task scheduling: what is due, what is upcoming, and the care streak.
//!
//! Due-date matching is by local calendar day. The streak is the only piece
//! of [`crate::models::Stats`] this module writes; the plant and journal
//! counts belong to the store's recount.

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate, Utc};

use crate::models::{Stats, Task, TaskView, UpdateTaskInput};
use crate::store::Store;

/// Default look-ahead for upcoming tasks, in days.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 7;

impl Store {
    /// All tasks due on the given local calendar day, completed or not.
    ///
    /// Tasks whose owning plant has been removed are still listed, carrying
    /// the placeholder label.
    pub fn tasks_for_date(&self, date: NaiveDate) -> Vec<TaskView> {
        self.all_tasks()
            .into_iter()
            .filter(|t| t.due_date.with_timezone(&Local).date_naive() == date)
            .map(|t| self.with_plant_label(t))
            .collect()
    }

    /// Incomplete tasks due within `[now, now + window_days]`, ascending by
    /// due date.
    pub fn upcoming_tasks(&self, window_days: i64) -> Vec<TaskView> {
        let now = Utc::now();
        let until = now + Duration::days(window_days);

        let mut tasks: Vec<Task> = self
            .all_tasks()
            .into_iter()
            .filter(|t| !t.completed && t.due_date >= now && t.due_date <= until)
            .collect();
        tasks.sort_by_key(|t| t.due_date);

        tasks
            .into_iter()
            .map(|t| self.with_plant_label(t))
            .collect()
    }

    /// Mark a task completed. Completion is what feeds the care streak;
    /// editing a task's due date or interval never does.
    pub fn complete_task(&self, id: i64) -> Result<Option<Task>> {
        self.update_task(
            id,
            UpdateTaskInput {
                completed: Some(true),
                ..Default::default()
            },
        )
    }

    pub fn update_care_streak(&self) -> Result<Stats> {
        self.update_care_streak_on(Local::now().date_naive())
    }

    /// Advance the care streak for a care action performed on `today`.
    ///
    /// Idempotent within a calendar day: if `today` is already recorded this
    /// is a no-op. A care action exactly one day after the last one grows the
    /// streak by 1; any longer gap resets it to 1.
    pub fn update_care_streak_on(&self, today: NaiveDate) -> Result<Stats> {
        let mut stats = self.stats();
        if stats.last_care_date == Some(today) {
            return Ok(stats);
        }

        let yesterday = today - Duration::days(1);
        if stats.last_care_date == Some(yesterday) {
            stats.care_streak += 1;
        } else {
            stats.care_streak = 1;
        }
        stats.last_care_date = Some(today);

        self.write_stats(&stats)?;
        Ok(stats)
    }

    fn with_plant_label(&self, task: Task) -> TaskView {
        TaskView {
            plant_name: self.plant_label(task.plant_id),
            task,
        }
    }
}
