use chrono::{DateTime, Local, TimeZone, Utc};

use super::entities::TimeEntry;

/// Labels offered when picking what to track.
pub const AVAILABLE_TASKS: [&str; 7] = [
    "Homepage Design",
    "API Development",
    "Code Review",
    "User Testing",
    "Documentation",
    "Bug Fixes",
    "Feature Planning",
];

fn local(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(2024, month, day, hour, minute, 0)
        .earliest()
        .map(|v| v.to_utc())
        .unwrap_or_default()
}

fn finished(
    id: u64,
    title: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    category: &str,
) -> TimeEntry {
    TimeEntry {
        category: category.into(),
        ..TimeEntry::running(id, title.into(), start).finalize(end)
    }
}

/// History every tracker starts with.
pub fn sample_entries() -> Vec<TimeEntry> {
    vec![
        finished(
            1,
            "Homepage Design",
            local(1, 15, 9, 0),
            local(1, 15, 11, 30),
            "Design",
        ),
        finished(
            2,
            "API Development",
            local(1, 15, 14, 0),
            local(1, 15, 17, 45),
            "Development",
        ),
        finished(
            3,
            "Code Review",
            local(1, 16, 10, 30),
            local(1, 16, 11, 15),
            "Development",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::sample_entries;

    #[test]
    fn sample_durations_match_their_intervals() {
        let durations = sample_entries()
            .iter()
            .map(|e| e.duration)
            .collect::<Vec<_>>();
        assert_eq!(durations, vec![150, 225, 45]);
        assert!(sample_entries().iter().all(|e| !e.is_running));
    }
}
