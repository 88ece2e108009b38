use std::{
    fmt::Display,
    io::{self, Write},
    sync::Arc,
    time::Duration,
};

use anyhow::Result;
use chrono::{DateTime, Local};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};
use serde_json::json;
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tracing::{info, instrument};

use crate::{
    notify::Notifier,
    tracking::{
        aggregates::SessionTotals,
        entities::TimeEntry,
        format::{format_duration, format_elapsed},
        samples::{sample_entries, AVAILABLE_TASKS},
        ticker::{LiveTracker, DEFAULT_TICK_INTERVAL},
        tracker::{FinishKind, SessionTracker, TrackerError},
    },
    utils::clock::Clock,
};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct TrackCommand {
    #[arg(
        long,
        short,
        help = format!("Label of the session, for example one of: {}", AVAILABLE_TASKS.join(", "))
    )]
    task: String,
    #[arg(
        long,
        short,
        default_value_t = 60,
        help = "How long to run before finishing the session. Ctrl-C finishes early"
    )]
    seconds: u64,
    #[arg(long, default_value_t = FinishKind::Stop, help = "How the session is closed at the end")]
    finish: FinishKind,
}

#[derive(Debug, Parser)]
pub struct SessionsCommand {
    #[arg(
        long,
        help = "Evaluate totals at another moment. Examples are \"yesterday\", \"15/01/2024\", \"12:00 16/01/2024\""
    )]
    at: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(long, help = "Print sessions and totals as JSON")]
    json: bool,
}

/// Runs one live session against the sample history and prints the stopwatch on every tick.
#[instrument(skip_all)]
pub async fn process_track_command(
    TrackCommand {
        task,
        seconds,
        finish,
    }: TrackCommand,
    clock: Arc<dyn Clock>,
    notifier: Box<dyn Notifier>,
) -> Result<()> {
    let tracker = SessionTracker::new(sample_entries(), clock, notifier);
    let mut live = LiveTracker::new(tracker, DEFAULT_TICK_INTERVAL);

    if !start_session(&mut live, &task)? {
        return Ok(());
    }
    let mut ticks = WatchStream::from_changes(live.subscribe());
    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, finishing session early");
                break
            }
            Some(elapsed) = ticks.next() => {
                print!("\r{} {task}", format_elapsed(elapsed));
                io::stdout().flush()?;
            }
        }
    }
    println!();

    if let Some(entry) = live.finish(finish).await {
        print_entry(&entry);
    }
    print_totals(&live.tracker().totals());
    Ok(())
}

/// Returns false when no task was selected. The notifier has already told the user, so the
/// command ends without an error of its own.
fn start_session(live: &mut LiveTracker, task: &str) -> Result<bool> {
    match live.start(task) {
        Ok(_) => Ok(true),
        Err(TrackerError::EmptyTaskSelection) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub fn process_sessions_command(
    SessionsCommand {
        at,
        date_style,
        json,
    }: SessionsCommand,
    clock: Arc<dyn Clock>,
    notifier: Box<dyn Notifier>,
) -> Result<()> {
    let now = clock.time().with_timezone(&Local);
    let at = parse_moment(at, date_style, now)?;
    let tracker = SessionTracker::new(sample_entries(), clock, notifier);
    let totals = tracker.totals_at(&at);

    if json {
        let output = json!({
            "recent": tracker.recent_entries(),
            "totals": totals,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for entry in tracker.recent_entries() {
        print_entry(entry);
    }
    println!();
    print_totals(&totals);
    Ok(())
}

fn parse_moment(
    value: Option<String>,
    date_style: DateStyle,
    now: DateTime<Local>,
) -> Result<DateTime<Local>> {
    match value.map(|s| parse_date_string(&s, now, date_style.into())) {
        Some(Ok(v)) => Ok(v.with_timezone(&Local)),
        Some(Err(e)) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {e}"),
            )
            .into()),
        None => Ok(now),
    }
}

fn print_entry(entry: &TimeEntry) {
    let start = entry.start_time.with_timezone(&Local);
    let end = entry
        .end_time
        .map(|v| format!(" - {}", v.with_timezone(&Local).format("%H:%M")))
        .unwrap_or_default();
    println!(
        "{}\t{}{}\t{}\t{}\t{}",
        start.format("%x"),
        start.format("%H:%M"),
        end,
        format_duration(entry.duration),
        entry.category,
        entry.task_title
    );
}

fn print_totals(totals: &SessionTotals) {
    println!("Today\t{}", format_duration(totals.today_minutes));
    println!("This week\t{}", format_duration(totals.week_minutes));
    println!("Sessions today\t{}", totals.sessions_today);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use crate::{
        notify::{MockNotifier, NoticeVariant},
        tracking::{
            ticker::{LiveTracker, DEFAULT_TICK_INTERVAL},
            tracker::SessionTracker,
        },
        utils::clock::test_clock::ManualClock,
    };

    use super::start_session;

    fn live_tracker(notifier: MockNotifier) -> LiveTracker {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap());
        let tracker = SessionTracker::new(vec![], Arc::new(clock), Box::new(notifier));
        LiveTracker::new(tracker, DEFAULT_TICK_INTERVAL)
    }

    #[tokio::test]
    async fn blank_task_is_reported_once() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| n.variant == NoticeVariant::Destructive && n.title == "Select a task")
            .times(1)
            .return_const(());
        let mut live = live_tracker(notifier);

        assert!(!start_session(&mut live, "  ").unwrap());
        assert!(!live.is_ticking());
    }

    #[tokio::test]
    async fn second_start_is_still_an_error() {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().return_const(());
        let mut live = live_tracker(notifier);

        assert!(start_session(&mut live, "Code Review").unwrap());
        let err = start_session(&mut live, "Code Review").unwrap_err();
        assert!(err.to_string().contains("already running"));
        live.stop().await;
    }
}
