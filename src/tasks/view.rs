use std::{fmt::Display, str::FromStr};

use clap::ValueEnum;

use super::entities::{Status, Task};

/// Which tasks a view keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == *status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        <Status as ValueEnum>::from_str(s, true).map(StatusFilter::Only)
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    /// High before medium before low. Equal priorities keep their registry order.
    #[default]
    Priority,
    /// Newest first.
    Date,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Priority => write!(f, "priority"),
            SortKey::Date => write!(f, "date"),
        }
    }
}

/// Filtered and sorted projection of `tasks`. The input is left untouched and both sorts are
/// stable.
pub fn view<'a>(tasks: &'a [Task], filter: StatusFilter, sort: SortKey) -> Vec<&'a Task> {
    let mut selected = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .collect::<Vec<_>>();
    match sort {
        SortKey::Priority => {
            selected.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()))
        }
        SortKey::Date => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    selected
}
