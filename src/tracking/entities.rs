use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timed interval against a task label. `task_title` is a copy of the label, not a reference
/// into the task registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: u64,
    pub task_title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Whole minutes.
    pub duration: u32,
    pub category: String,
    pub is_running: bool,
}

impl TimeEntry {
    pub fn running(id: u64, task_title: String, start_time: DateTime<Utc>) -> Self {
        Self {
            id,
            task_title,
            start_time,
            end_time: None,
            duration: 0,
            category: "General".into(),
            is_running: true,
        }
    }

    /// Seconds between the start and `now`. A clock that went backwards yields 0.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        elapsed_seconds(self.start_time, now)
    }

    /// Closes the entry at `now`. Duration is recomputed from the wall clock delta and truncated
    /// to whole minutes.
    pub fn finalize(self, now: DateTime<Utc>) -> Self {
        let duration = u32::try_from(self.elapsed_seconds(now) / 60).unwrap_or(u32::MAX);
        Self {
            end_time: Some(now),
            duration,
            is_running: false,
            ..self
        }
    }
}

pub fn elapsed_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - start).num_seconds()).unwrap_or(0)
}
