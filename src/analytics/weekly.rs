use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::tasks::Task;

/// Labels are "Mon DD", so anything longer than a year would repeat.
pub const MAX_WEEKS: u32 = 52;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    /// `total_resolved / weeks_analyzed`, unrounded.
    pub average_per_week: f64,
    pub total_resolved: usize,
    pub weeks_analyzed: u32,
    /// Oldest week first.
    pub weekly_breakdown: IndexMap<String, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

struct WeekBucket {
    start: DateTime<Utc>,
    label: String,
    count: usize,
}

impl WeekBucket {
    fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.start + Duration::days(7)
    }
}

/// Monday 00:00 UTC of the week containing `now`.
pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    Utc.from_utc_datetime(&monday.and_time(NaiveTime::MIN))
}

/// Count resolutions per calendar week over the trailing `weeks` weeks.
///
/// Tasks resolved before the window (or after `now`'s week) are dropped
/// entirely, so `total_resolved` only covers what is in `weekly_breakdown`.
pub fn weekly_resolved(
    tasks: &[Task],
    weeks: u32,
    assignee: Option<&str>,
    now: DateTime<Utc>,
) -> AnalyticsResult {
    let weeks = weeks.min(MAX_WEEKS);
    let current = week_start(now);

    let mut buckets: Vec<WeekBucket> = (0..weeks)
        .rev()
        .map(|ago| {
            let start = current - Duration::weeks(i64::from(ago));
            WeekBucket {
                start,
                label: start.format("%b %d").to_string(),
                count: 0,
            }
        })
        .collect();

    let resolved = tasks
        .iter()
        .filter(|t| assignee.map_or(true, |a| t.assigned_to(a)))
        .filter_map(|t| t.resolved_date);

    for at in resolved {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.contains(at)) {
            bucket.count += 1;
        }
    }

    let total_resolved: usize = buckets.iter().map(|b| b.count).sum();
    let average_per_week = if weeks == 0 {
        0.0
    } else {
        total_resolved as f64 / f64::from(weeks)
    };

    AnalyticsResult {
        average_per_week,
        total_resolved,
        weeks_analyzed: weeks,
        weekly_breakdown: buckets.into_iter().map(|b| (b.label, b.count)).collect(),
        assignee: assignee.map(str::to_string),
    }
}
