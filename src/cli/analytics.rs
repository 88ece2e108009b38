use ansi_term::Colour;
use anyhow::Result;
use clap::Parser;
use serde_json::json;

use crate::{
    analytics::{
        datasets::{category_breakdown, productivity_trend},
        AnalyticsPresenter, TimeRange,
    },
    utils::percentage::Percentage,
};

#[derive(Debug, Parser)]
pub struct AnalyticsCommand {
    #[arg(long, short, default_value_t = TimeRange::Week)]
    range: TimeRange,
    #[arg(long, short, help = "Highlight points with productivity below this percentage")]
    below: Option<Percentage>,
    #[arg(long, help = "Also show the time per category and the daily productivity trend")]
    breakdown: bool,
    #[arg(long, help = "Print the figures as JSON")]
    json: bool,
}

pub fn process_analytics_command(
    AnalyticsCommand {
        range,
        below,
        breakdown,
        json,
    }: AnalyticsCommand,
) -> Result<()> {
    let presenter = AnalyticsPresenter::new(range);
    let summary = presenter.summary();

    if json {
        let output = json!({
            "range": presenter.range(),
            "points": presenter.points(),
            "summary": summary,
            "categories": breakdown.then(category_breakdown),
            "trend": breakdown.then(productivity_trend),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for point in presenter.points() {
        let productivity = point.productivity.to_string();
        let productivity = match below {
            Some(threshold) if point.productivity < threshold => {
                Colour::Red.paint(productivity).to_string()
            }
            _ => productivity,
        };
        println!(
            "{}\t{:.1}h\t{} tasks\t{}",
            point.label, point.hours, point.tasks, productivity
        );
    }
    println!();
    println!("Total hours\t{:.1}h", summary.total_hours);
    println!("Total tasks\t{}", summary.total_tasks);
    println!("Avg productivity\t{}", summary.average_productivity);

    if breakdown {
        println!();
        for category in category_breakdown() {
            println!("{}\t{}", category.name, category.share);
        }
        println!();
        for point in productivity_trend() {
            println!("{}\t{}", point.date, point.score);
        }
    }
    Ok(())
}
