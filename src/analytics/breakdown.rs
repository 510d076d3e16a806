use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::tasks::{Task, TaskStatus};

pub const UNASSIGNED: &str = "Unassigned";

/// Status -> count, in order of first appearance.
pub fn status_counts<'a, I>(tasks: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut counts = IndexMap::new();
    for task in tasks {
        *counts.entry(task.status.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Assignee -> count, in order of first appearance. Tasks without an
/// assignee are skipped unless `include_unassigned` buckets them under
/// "Unassigned".
pub fn assignee_counts(tasks: &[Task], include_unassigned: bool) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for task in tasks {
        let key = match task.assignee.as_deref().filter(|a| !a.trim().is_empty()) {
            Some(a) => a,
            None if include_unassigned => UNASSIGNED,
            None => continue,
        };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAnalysis {
    pub total_tasks: usize,
    pub status_breakdown: IndexMap<String, usize>,
    pub assignee_breakdown: IndexMap<String, usize>,
    pub completion_percentage: f64,
    pub insights: Vec<String>,
}

pub fn analyze(tasks: &[Task]) -> TaskAnalysis {
    let total = tasks.len();
    let status_breakdown = status_counts(tasks);
    let assignee_breakdown = assignee_counts(tasks, true);

    let done = status_breakdown.get(TaskStatus::DONE).copied().unwrap_or(0);
    let completion_percentage = if total > 0 {
        done as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let mut insights = Vec::new();
    if completion_percentage < 30.0 {
        insights.push("Project is in early stages with most tasks still pending".to_string());
    } else if completion_percentage > 70.0 {
        insights.push("Project is nearing completion with most tasks done".to_string());
    }

    let single_owner = assignee_breakdown.len() == 1 && !assignee_breakdown.contains_key(UNASSIGNED);
    if single_owner {
        insights.push("All tasks are assigned to a single person".to_string());
    } else if let Some(unassigned) = assignee_breakdown.get(UNASSIGNED) {
        insights.push(format!("{unassigned} tasks need to be assigned"));
    }

    let in_progress = status_breakdown.get(TaskStatus::IN_PROGRESS).copied().unwrap_or(0);
    if in_progress as f64 > total as f64 * 0.5 {
        insights.push("High number of tasks in progress - consider focusing efforts".to_string());
    }

    TaskAnalysis {
        total_tasks: total,
        status_breakdown,
        assignee_breakdown,
        completion_percentage,
        insights,
    }
}
