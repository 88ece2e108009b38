//! Totals over finished sessions. Every function takes the reference "now" explicitly, in the
//! timezone whose calendar defines "today" and "this week".

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::utils::time::{is_same_day, week_start};

use super::entities::TimeEntry;

/// Minutes of sessions that started on the calendar day of `now`.
pub fn todays_total_minutes<Tz: TimeZone>(entries: &[TimeEntry], now: &DateTime<Tz>) -> u32 {
    entries
        .iter()
        .filter(|e| is_same_day(&e.start_time, now))
        .map(|e| e.duration)
        .sum()
}

/// Minutes of sessions that started at or after midnight of the most recent Sunday.
pub fn this_weeks_total_minutes<Tz: TimeZone>(entries: &[TimeEntry], now: &DateTime<Tz>) -> u32 {
    let start = week_start(now).with_timezone(&Utc);
    entries
        .iter()
        .filter(|e| e.start_time >= start)
        .map(|e| e.duration)
        .sum()
}

pub fn sessions_today<Tz: TimeZone>(entries: &[TimeEntry], now: &DateTime<Tz>) -> usize {
    entries
        .iter()
        .filter(|e| is_same_day(&e.start_time, now))
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTotals {
    pub today_minutes: u32,
    pub week_minutes: u32,
    pub sessions_today: usize,
}

impl SessionTotals {
    pub fn at<Tz: TimeZone>(entries: &[TimeEntry], now: &DateTime<Tz>) -> Self {
        Self {
            today_minutes: todays_total_minutes(entries, now),
            week_minutes: this_weeks_total_minutes(entries, now),
            sessions_today: sessions_today(entries, now),
        }
    }
}
