use chrono::{DateTime, Utc};

/// Hands out ids derived from the creation time in milliseconds. Two records created within the
/// same millisecond, or after the clock went backwards, still get distinct increasing ids.
#[derive(Debug, Default, Clone)]
pub struct MonotonicIds {
    last: u64,
}

impl MonotonicIds {
    /// Continues after ids that already exist, for example seeded sample data.
    pub fn after(last: u64) -> Self {
        Self { last }
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> u64 {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        self.last = candidate.max(self.last + 1);
        self.last
    }
}
