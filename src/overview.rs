//! Dashboard overview: one snapshot of task progress, tracked time against the daily and weekly
//! goals, and the productivity score of the selected analytics range.

use serde::Serialize;

use crate::{
    analytics::Summary,
    tasks::{
        entities::{Priority, Status},
        registry::TaskRegistry,
        view::{SortKey, StatusFilter},
    },
    tracking::aggregates::SessionTotals,
    utils::percentage::Percentage,
};

pub const DAILY_GOAL_MINUTES: u32 = 8 * 60;
pub const WEEKLY_GOAL_MINUTES: u32 = 40 * 60;
pub const RECENT_TASK_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTask {
    pub id: u64,
    pub title: String,
    pub status: Status,
    pub priority: Priority,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub completion: Percentage,
    pub today_minutes: u32,
    pub daily_goal_minutes: u32,
    pub week_minutes: u32,
    pub weekly_goal_minutes: u32,
    pub weekly_progress: Percentage,
    pub productivity: Percentage,
    pub recent_tasks: Vec<RecentTask>,
}

impl Overview {
    pub fn collect(registry: &TaskRegistry, totals: &SessionTotals, summary: &Summary) -> Self {
        let total_tasks = registry.len();
        let completed_tasks = registry
            .tasks()
            .iter()
            .filter(|t| t.status == Status::Completed)
            .count();
        let recent_tasks = registry
            .view(StatusFilter::All, SortKey::Date)
            .into_iter()
            .take(RECENT_TASK_COUNT)
            .map(|t| RecentTask {
                id: t.id,
                title: t.title.clone(),
                status: t.status,
                priority: t.priority,
                time: t.actual_time.clone(),
            })
            .collect();

        Self {
            completed_tasks,
            total_tasks,
            completion: Percentage::ratio(completed_tasks as f64, total_tasks as f64),
            today_minutes: totals.today_minutes,
            daily_goal_minutes: DAILY_GOAL_MINUTES,
            week_minutes: totals.week_minutes,
            weekly_goal_minutes: WEEKLY_GOAL_MINUTES,
            weekly_progress: Percentage::ratio(
                totals.week_minutes as f64,
                WEEKLY_GOAL_MINUTES as f64,
            ),
            productivity: summary.average_productivity,
            recent_tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use crate::{
        analytics::{summary, TimeRange},
        notify::MockNotifier,
        tasks::{
            entities::{Priority, Status},
            registry::TaskRegistry,
            samples::sample_tasks,
        },
        tracking::aggregates::SessionTotals,
        utils::{clock::test_clock::ManualClock, percentage::Percentage},
    };

    use super::{Overview, DAILY_GOAL_MINUTES, WEEKLY_GOAL_MINUTES};

    fn registry() -> TaskRegistry {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().return_const(());
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 18, 12, 0, 0).unwrap());
        TaskRegistry::new(sample_tasks(), Arc::new(clock), Box::new(notifier))
    }

    fn percent(value: f64) -> Percentage {
        Percentage::new_opt(value).unwrap()
    }

    fn totals() -> SessionTotals {
        SessionTotals {
            today_minutes: 390,
            week_minutes: 32 * 60,
            sessions_today: 3,
        }
    }

    #[test]
    fn figures_from_sample_data() {
        let overview = Overview::collect(&registry(), &totals(), &summary(TimeRange::Week));

        assert_eq!(overview.completed_tasks, 1);
        assert_eq!(overview.total_tasks, 4);
        assert_eq!(overview.completion, percent(25.));
        assert_eq!(overview.today_minutes, 390);
        assert_eq!(overview.daily_goal_minutes, DAILY_GOAL_MINUTES);
        assert_eq!(overview.week_minutes, 1920);
        assert_eq!(overview.weekly_goal_minutes, WEEKLY_GOAL_MINUTES);
        assert_eq!(overview.weekly_progress, percent(80.));
        assert_eq!(overview.productivity, percent(76.));
    }

    #[test]
    fn recent_tasks_are_newest_first() {
        let overview = Overview::collect(&registry(), &totals(), &summary(TimeRange::Month));

        let ids: Vec<u64> = overview.recent_tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 3, 1]);
        assert_eq!(overview.recent_tasks[2].status, Status::InProgress);
        assert_eq!(overview.recent_tasks[2].priority, Priority::High);
        assert_eq!(overview.productivity, percent(85.));
    }

    #[test]
    fn completion_follows_status_changes() {
        let mut registry = registry();
        registry.set_status(1, Status::Completed);
        registry.delete_task(4);

        let overview = Overview::collect(&registry, &totals(), &summary(TimeRange::Week));
        assert_eq!((overview.completed_tasks, overview.total_tasks), (2, 3));
        assert_eq!(overview.completion, percent(67.));
    }

    #[test]
    fn empty_registry_has_no_progress() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 18, 12, 0, 0).unwrap());
        let registry = TaskRegistry::new(vec![], Arc::new(clock), Box::new(notifier));
        let totals = SessionTotals {
            today_minutes: 0,
            week_minutes: 0,
            sessions_today: 0,
        };

        let overview = Overview::collect(&registry, &totals, &summary(TimeRange::Week));
        assert_eq!(overview.completion, percent(0.));
        assert_eq!(overview.weekly_progress, percent(0.));
        assert!(overview.recent_tasks.is_empty());
    }
}
