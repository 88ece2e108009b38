//! Stopwatch for work sessions: the [tracker::SessionTracker] state machine, its live display
//! tick and totals over the session history.

pub mod aggregates;
pub mod entities;
pub mod format;
pub mod samples;
pub mod ticker;
pub mod tracker;
