use std::{fmt::Display, ops::Deref, str::FromStr};

use anyhow::anyhow;
use serde::Serialize;

/// Productivity scores and thresholds. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }

    /// `part` as a whole-number share of `whole`. Zero when `whole` is zero.
    pub fn ratio(part: f64, whole: f64) -> Percentage {
        if whole <= 0. {
            return Percentage(0.);
        }
        Percentage((part.max(0.) / whole * 100.).round())
    }

    /// Only for values known at compile time to be valid.
    pub(crate) const fn from_const(value: f64) -> Percentage {
        Percentage(value)
    }
}

impl FromStr for Percentage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // This means that 100%% also works, but I think I'm fine with that
        let s = s.trim_end_matches("%");
        let v = s.parse::<f64>()?;
        Percentage::new_opt(v).ok_or_else(|| anyhow!("Can't parse {s} into percentage"))
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Arithmetic mean rounded half away from zero. Zero for an empty input.
pub fn rounded_mean(values: impl IntoIterator<Item = Percentage>) -> Percentage {
    let (sum, count) = values
        .into_iter()
        .fold((0., 0u32), |(sum, count), v| (sum + *v, count + 1));
    if count == 0 {
        return Percentage(0.);
    }
    Percentage((sum / count as f64).round())
}
