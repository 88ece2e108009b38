use chrono::{DateTime, NaiveDate, Utc};

use super::entities::{Priority, Status, Task};

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .unwrap_or_default()
}

/// Tasks every registry starts with.
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Design homepage mockup".into(),
            description: "Create wireframes and high-fidelity designs for the new homepage".into(),
            priority: Priority::High,
            status: Status::InProgress,
            category: "Design".into(),
            estimated_time: "4h".into(),
            actual_time: "2h 30m".into(),
            created_at: day(2024, 1, 15),
        },
        Task {
            id: 2,
            title: "Implement user authentication".into(),
            description: "Set up login, register, and password reset functionality".into(),
            priority: Priority::High,
            status: Status::Completed,
            category: "Development".into(),
            estimated_time: "6h".into(),
            actual_time: "5h 45m".into(),
            created_at: day(2024, 1, 14),
        },
        Task {
            id: 3,
            title: "Write API documentation".into(),
            description: "Document all endpoints with examples and response formats".into(),
            priority: Priority::Medium,
            status: Status::Pending,
            category: "Documentation".into(),
            estimated_time: "3h".into(),
            actual_time: "0h".into(),
            created_at: day(2024, 1, 16),
        },
        Task {
            id: 4,
            title: "Conduct user interviews".into(),
            description: "Schedule and conduct 5 user interviews for product feedback".into(),
            priority: Priority::Low,
            status: Status::Pending,
            category: "Research".into(),
            estimated_time: "8h".into(),
            actual_time: "0h".into(),
            created_at: day(2024, 1, 17),
        },
    ]
}
