//! Small productivity toolkit for the terminal: a task list, a stopwatch for work sessions and
//! a handful of productivity figures. Everything lives in memory and starts from sample data.
//!

pub mod analytics;
pub mod cli;
pub mod notify;
pub mod overview;
pub mod tasks;
pub mod tracking;
pub mod utils;
