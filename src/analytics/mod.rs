//! Derived metrics over a task snapshot. Everything here is recomputed per
//! request and never stored.

pub mod breakdown;
pub mod weekly;

pub use breakdown::{analyze, assignee_counts, status_counts, TaskAnalysis, UNASSIGNED};
pub use weekly::{week_start, weekly_resolved, AnalyticsResult, MAX_WEEKS};
