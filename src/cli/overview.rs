use std::sync::Arc;

use ansi_term::Colour;
use anyhow::Result;
use clap::Parser;

use crate::{
    analytics::{summary, TimeRange},
    notify::{Notifier, TracingNotifier},
    overview::Overview,
    tasks::{registry::TaskRegistry, samples::sample_tasks},
    tracking::{format::format_duration, samples::sample_entries, tracker::SessionTracker},
    utils::clock::Clock,
};

use super::tasks::{paint_priority, paint_status};

#[derive(Debug, Parser)]
pub struct OverviewCommand {
    #[arg(
        long,
        short,
        default_value_t = TimeRange::Week,
        help = "Analytics range the productivity score is taken from"
    )]
    range: TimeRange,
    #[arg(long, help = "Print the overview as JSON")]
    json: bool,
}

pub fn process_overview_command(
    OverviewCommand { range, json }: OverviewCommand,
    clock: Arc<dyn Clock>,
    notifier: Box<dyn Notifier>,
) -> Result<()> {
    let registry = TaskRegistry::new(sample_tasks(), clock.clone(), notifier);
    // Only read from, so it never has anything to notify about.
    let tracker = SessionTracker::new(sample_entries(), clock, Box::new(TracingNotifier));
    let overview = Overview::collect(&registry, &tracker.totals(), &summary(range));

    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    println!(
        "Tasks completed\t{}/{}\t{}",
        overview.completed_tasks, overview.total_tasks, overview.completion
    );
    println!(
        "Hours today\t{}\tgoal {}",
        format_duration(overview.today_minutes),
        format_duration(overview.daily_goal_minutes)
    );
    println!(
        "Weekly goal\t{}/{}\t{}",
        format_duration(overview.week_minutes),
        format_duration(overview.weekly_goal_minutes),
        overview.weekly_progress
    );
    println!("Productivity\t{}", overview.productivity);
    println!();
    println!("{}", Colour::White.bold().paint("Recent tasks"));
    for task in &overview.recent_tasks {
        println!(
            "{}\t{}\t{}\t{}",
            paint_status(task.status),
            paint_priority(task.priority),
            task.time,
            task.title
        );
    }
    Ok(())
}
