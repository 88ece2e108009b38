//! Fixed productivity figures. Nothing here is derived from the task list or the stopwatch: the
//! presenter only picks a dataset by [TimeRange] and reduces it to summary numbers.

pub mod datasets;

use std::fmt::Display;

use clap::ValueEnum;
use datasets::{monthly_data, weekly_data, AggregatePoint};
use serde::Serialize;
use tracing::debug;

use crate::utils::percentage::{rounded_mean, Percentage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeRange {
    #[default]
    Week,
    Month,
}

impl TimeRange {
    pub fn points(&self) -> &'static [AggregatePoint] {
        match self {
            TimeRange::Week => weekly_data(),
            TimeRange::Month => monthly_data(),
        }
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::Week => write!(f, "week"),
            TimeRange::Month => write!(f, "month"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_hours: f64,
    pub total_tasks: u32,
    pub average_productivity: Percentage,
}

/// Sums hours and tasks and averages productivity over `points`.
pub fn summarize(points: &[AggregatePoint]) -> Summary {
    Summary {
        total_hours: points.iter().map(|p| p.hours).sum(),
        total_tasks: points.iter().map(|p| p.tasks).sum(),
        average_productivity: rounded_mean(points.iter().map(|p| p.productivity)),
    }
}

pub fn summary(range: TimeRange) -> Summary {
    summarize(range.points())
}

/// Holds the selected range. The summary is recomputed on every call.
#[derive(Debug, Default)]
pub struct AnalyticsPresenter {
    range: TimeRange,
}

impl AnalyticsPresenter {
    pub fn new(range: TimeRange) -> Self {
        Self { range }
    }

    pub fn select(&mut self, range: TimeRange) {
        debug!("Selected range {range}");
        self.range = range;
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn points(&self) -> &'static [AggregatePoint] {
        self.range.points()
    }

    pub fn summary(&self) -> Summary {
        summary(self.range)
    }
}
