use serde::Serialize;

use crate::utils::percentage::Percentage;

/// One bar of the hours / tasks / productivity charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatePoint {
    pub label: &'static str,
    pub hours: f64,
    pub tasks: u32,
    pub productivity: Percentage,
}

const fn point(label: &'static str, hours: f64, tasks: u32, productivity: f64) -> AggregatePoint {
    AggregatePoint {
        label,
        hours,
        tasks,
        productivity: Percentage::from_const(productivity),
    }
}

const WEEKLY: [AggregatePoint; 7] = [
    point("Mon", 7.5, 5, 85.),
    point("Tue", 6.2, 4, 78.),
    point("Wed", 8.1, 6, 92.),
    point("Thu", 5.8, 3, 72.),
    point("Fri", 7.9, 5, 88.),
    point("Sat", 3.2, 2, 65.),
    point("Sun", 2.1, 1, 55.),
];

const MONTHLY: [AggregatePoint; 4] = [
    point("Week 1", 35.2, 18, 82.),
    point("Week 2", 38.7, 22, 87.),
    point("Week 3", 32.1, 16, 79.),
    point("Week 4", 40.3, 25, 91.),
];

pub fn weekly_data() -> &'static [AggregatePoint] {
    &WEEKLY
}

pub fn monthly_data() -> &'static [AggregatePoint] {
    &MONTHLY
}

/// Share of tracked time per category, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: &'static str,
    pub share: Percentage,
    pub color: &'static str,
}

const CATEGORIES: [CategoryShare; 5] = [
    CategoryShare {
        name: "Development",
        share: Percentage::from_const(45.),
        color: "#3b82f6",
    },
    CategoryShare {
        name: "Design",
        share: Percentage::from_const(25.),
        color: "#10b981",
    },
    CategoryShare {
        name: "Meetings",
        share: Percentage::from_const(15.),
        color: "#f59e0b",
    },
    CategoryShare {
        name: "Documentation",
        share: Percentage::from_const(10.),
        color: "#ef4444",
    },
    CategoryShare {
        name: "Research",
        share: Percentage::from_const(5.),
        color: "#8b5cf6",
    },
];

pub fn category_breakdown() -> &'static [CategoryShare] {
    &CATEGORIES
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: &'static str,
    pub score: Percentage,
}

const fn trend(date: &'static str, score: f64) -> TrendPoint {
    TrendPoint {
        date,
        score: Percentage::from_const(score),
    }
}

const TREND: [TrendPoint; 10] = [
    trend("1/1", 75.),
    trend("1/2", 82.),
    trend("1/3", 78.),
    trend("1/4", 85.),
    trend("1/5", 91.),
    trend("1/6", 88.),
    trend("1/7", 94.),
    trend("1/8", 87.),
    trend("1/9", 92.),
    trend("1/10", 89.),
];

/// Daily productivity scores.
pub fn productivity_trend() -> &'static [TrendPoint] {
    &TREND
}
