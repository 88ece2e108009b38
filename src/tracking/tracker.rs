use std::{fmt::Display, sync::Arc};

use chrono::{DateTime, Local, TimeZone};
use clap::ValueEnum;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    notify::{Notice, Notifier},
    utils::{clock::Clock, ids::MonotonicIds},
};

use super::{
    aggregates::{self, SessionTotals},
    entities::TimeEntry,
    format::format_duration,
};

const RECENT_ENTRIES: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Please select a task before starting the timer")]
    EmptyTaskSelection,
    #[error("A session for \"{0}\" is already running. Pause or stop it first")]
    SessionAlreadyRunning(String),
}

/// How a running session is closed. Both finalize the session the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FinishKind {
    Pause,
    #[default]
    Stop,
}

impl Display for FinishKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinishKind::Pause => write!(f, "pause"),
            FinishKind::Stop => write!(f, "stop"),
        }
    }
}

/// Stopwatch over a single session slot.
///
/// Idle: `current` is empty. [SessionTracker::start] fills it with a running entry.
/// Running: [SessionTracker::pause] or [SessionTracker::stop] finalize the entry, prepend it to the
/// history and empty the slot again. At most one entry is running at any time: history entries
/// are always finalized and a second start is refused.
pub struct SessionTracker {
    current: Option<TimeEntry>,
    history: Vec<TimeEntry>,
    ids: MonotonicIds,
    clock: Arc<dyn Clock>,
    notifier: Box<dyn Notifier>,
}

impl SessionTracker {
    pub fn new(
        history: Vec<TimeEntry>,
        clock: Arc<dyn Clock>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let last_id = history.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            current: None,
            history,
            ids: MonotonicIds::after(last_id),
            clock,
            notifier,
        }
    }

    #[instrument(skip(self))]
    pub fn start(&mut self, task_label: &str) -> Result<TimeEntry, TrackerError> {
        if task_label.trim().is_empty() {
            self.notifier.notify(Notice::destructive(
                "Select a task",
                TrackerError::EmptyTaskSelection.to_string(),
            ));
            return Err(TrackerError::EmptyTaskSelection);
        }
        if let Some(current) = &self.current {
            let err = TrackerError::SessionAlreadyRunning(current.task_title.clone());
            self.notifier
                .notify(Notice::destructive("Timer running", err.to_string()));
            return Err(err);
        }

        let now = self.clock.time();
        let entry = TimeEntry::running(self.ids.next(now), task_label.into(), now);
        info!("Started session {} at {}", entry.id, entry.start_time);
        self.current = Some(entry.clone());
        self.notifier.notify(Notice::new(
            "Timer Started",
            format!("Started tracking time for \"{task_label}\""),
        ));
        Ok(entry)
    }

    /// Finalizes the running session. Does nothing and returns `None` while idle.
    pub fn pause(&mut self) -> Option<TimeEntry> {
        self.finish(FinishKind::Pause)
    }

    /// Same finalization as [SessionTracker::pause], reported as a completed session.
    pub fn stop(&mut self) -> Option<TimeEntry> {
        self.finish(FinishKind::Stop)
    }

    #[instrument(skip(self))]
    pub fn finish(&mut self, kind: FinishKind) -> Option<TimeEntry> {
        let Some(current) = self.current.take() else {
            debug!("No running session to {kind}");
            return None;
        };
        let entry = current.finalize(self.clock.time());
        info!(
            "Finished session {} after {} minutes",
            entry.id, entry.duration
        );
        self.history.insert(0, entry.clone());

        let duration = format_duration(entry.duration);
        let notice = match kind {
            FinishKind::Pause => Notice::new(
                "Timer Paused",
                format!("Saved {duration} for \"{}\"", entry.task_title),
            ),
            FinishKind::Stop => Notice::new(
                "Timer Stopped",
                format!("Completed \"{}\" in {duration}", entry.task_title),
            ),
        };
        self.notifier.notify(notice);
        Some(entry)
    }

    pub fn current(&self) -> Option<&TimeEntry> {
        self.current.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Finalized sessions, newest first.
    pub fn history(&self) -> &[TimeEntry] {
        &self.history
    }

    pub fn recent_entries(&self) -> &[TimeEntry] {
        &self.history[..self.history.len().min(RECENT_ENTRIES)]
    }

    /// Seconds since the running session started, computed fresh from the clock. 0 while idle.
    pub fn elapsed_seconds(&self) -> u64 {
        self.current
            .as_ref()
            .map(|e| e.elapsed_seconds(self.clock.time()))
            .unwrap_or(0)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn todays_total_minutes(&self) -> u32 {
        aggregates::todays_total_minutes(&self.history, &self.local_now())
    }

    pub fn this_weeks_total_minutes(&self) -> u32 {
        aggregates::this_weeks_total_minutes(&self.history, &self.local_now())
    }

    pub fn sessions_today(&self) -> usize {
        aggregates::sessions_today(&self.history, &self.local_now())
    }

    pub fn totals(&self) -> SessionTotals {
        self.totals_at(&self.local_now())
    }

    pub fn totals_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> SessionTotals {
        SessionTotals::at(&self.history, now)
    }

    fn local_now(&self) -> DateTime<Local> {
        self.clock.time().with_timezone(&Local)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Local, TimeZone, Utc};
    use mockall::predicate::eq;

    use crate::{
        notify::{MockNotifier, Notice},
        tracking::{
            entities::TimeEntry,
            format::format_duration,
            samples::sample_entries,
            tracker::{FinishKind, SessionTracker, TrackerError},
        },
        utils::{clock::test_clock::ManualClock, logging::TEST_LOGGING},
    };

    fn quiet_notifier() -> Box<MockNotifier> {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().return_const(());
        Box::new(notifier)
    }

    fn tracker_with(notifier: Box<MockNotifier>) -> (SessionTracker, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap());
        let tracker = SessionTracker::new(sample_entries(), Arc::new(clock.clone()), notifier);
        (tracker, clock)
    }

    fn running_count(tracker: &SessionTracker) -> usize {
        tracker
            .history()
            .iter()
            .chain(tracker.current())
            .filter(|e| e.is_running)
            .count()
    }

    #[test]
    fn blank_label_keeps_tracker_idle() {
        *TEST_LOGGING;
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq(Notice::destructive(
                "Select a task",
                "Please select a task before starting the timer",
            )))
            .times(2)
            .return_const(());
        let (mut tracker, _) = tracker_with(Box::new(notifier));
        let history = tracker.history().to_vec();

        assert_eq!(tracker.start(""), Err(TrackerError::EmptyTaskSelection));
        assert_eq!(tracker.start("  "), Err(TrackerError::EmptyTaskSelection));
        assert!(!tracker.is_running());
        assert_eq!(tracker.history(), history.as_slice());
    }

    #[test]
    fn pause_after_ninety_seconds_saves_one_minute() {
        let (mut tracker, clock) = tracker_with(quiet_notifier());
        let started = tracker.start("X").unwrap();
        assert!(started.is_running);
        assert_eq!(started.duration, 0);
        assert_eq!(started.end_time, None);

        clock.advance(Duration::seconds(90));
        assert_eq!(tracker.elapsed_seconds(), 90);
        let entry = tracker.pause().unwrap();

        assert_eq!(entry.duration, 1);
        assert_eq!(format_duration(entry.duration), "1m");
        assert!(!entry.is_running);
        assert_eq!(entry.end_time, Some(started.start_time + Duration::seconds(90)));
        assert_eq!(tracker.history()[0], entry);
        assert_eq!(tracker.history().len(), 4);
        assert!(tracker.current().is_none());
        assert_eq!(tracker.elapsed_seconds(), 0);
    }

    #[test]
    fn stop_finalizes_like_pause() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| n.title == "Timer Started")
            .times(2)
            .return_const(());
        notifier
            .expect_notify()
            .with(eq(Notice::new(
                "Timer Paused",
                "Saved 2h 5m for \"Bug Fixes\"",
            )))
            .times(1)
            .return_const(());
        notifier
            .expect_notify()
            .with(eq(Notice::new(
                "Timer Stopped",
                "Completed \"Bug Fixes\" in 2h 5m",
            )))
            .times(1)
            .return_const(());
        let (mut tracker, clock) = tracker_with(Box::new(notifier));

        tracker.start("Bug Fixes").unwrap();
        clock.advance(Duration::seconds(125 * 60 + 59));
        let paused = tracker.pause().unwrap();

        tracker.start("Bug Fixes").unwrap();
        clock.advance(Duration::seconds(125 * 60 + 59));
        let stopped = tracker.stop().unwrap();

        let strip = |e: TimeEntry| (e.task_title, e.duration, e.is_running, e.category);
        assert_eq!(strip(paused), strip(stopped));
        assert_eq!(tracker.history().len(), 5);
    }

    #[test]
    fn second_start_is_refused() {
        let (mut tracker, clock) = tracker_with(quiet_notifier());
        let first = tracker.start("Code Review").unwrap();
        clock.advance(Duration::seconds(30));

        assert_eq!(
            tracker.start("Documentation"),
            Err(TrackerError::SessionAlreadyRunning("Code Review".into()))
        );
        assert_eq!(tracker.current(), Some(&first));
        assert_eq!(tracker.history().len(), 3);
    }

    #[test]
    fn finishing_while_idle_is_a_no_op() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let (mut tracker, _) = tracker_with(Box::new(notifier));

        assert_eq!(tracker.pause(), None);
        assert_eq!(tracker.stop(), None);
        assert_eq!(tracker.history().len(), 3);
    }

    enum Step {
        Start(&'static str),
        Pause,
        Stop,
    }

    #[test]
    fn never_more_than_one_running_session() {
        let (mut tracker, clock) = tracker_with(quiet_notifier());
        let steps = [
            Step::Start("A"),
            Step::Start("B"),
            Step::Pause,
            Step::Pause,
            Step::Start("C"),
            Step::Stop,
            Step::Start(""),
            Step::Stop,
        ];
        for step in steps.iter().cycle().take(40) {
            match step {
                Step::Start(label) => {
                    let _ = tracker.start(label);
                }
                Step::Pause => {
                    tracker.pause();
                }
                Step::Stop => {
                    tracker.finish(FinishKind::Stop);
                }
            }
            clock.advance(Duration::seconds(45));
            assert!(running_count(&tracker) <= 1);
            assert_eq!(running_count(&tracker), tracker.is_running() as usize);
        }
    }

    #[test]
    fn totals_only_count_today() {
        let (mut tracker, clock) = tracker_with(quiet_notifier());
        let today = Local.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap().to_utc();
        clock.set(today - Duration::days(1));
        tracker.start("Yesterday").unwrap();
        clock.advance(Duration::minutes(20));
        tracker.stop().unwrap();

        clock.set(today);
        tracker.start("Today").unwrap();
        clock.advance(Duration::minutes(35));
        tracker.stop().unwrap();

        assert_eq!(tracker.todays_total_minutes(), 35);
        assert_eq!(tracker.sessions_today(), 1);
        assert_eq!(tracker.recent_entries().len(), 5);
        assert_eq!(tracker.recent_entries()[0].task_title, "Today");
    }
}
