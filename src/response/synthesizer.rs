use chrono::{DateTime, Utc};
use std::fmt::Write as _;

use super::types::{ChartData, ChartKind, ResponseResult};
use crate::analytics::{analyze, assignee_counts, status_counts, weekly_resolved};
use crate::intent::Intent;
use crate::tasks::search::{filter_by_assignee, filter_by_status};
use crate::tasks::{search, Task, TaskStatus};

/// How many search hits are listed inline.
pub const SEARCH_PREVIEW: usize = 3;

const HELP_TEXT: &str = "AI Assistant Help

I can help you with:

Task Information:
• \"What's in progress?\" - Current work status
• \"What needs to be done?\" - Pending tasks
• \"Show completed tasks\" - Finished work
• \"Give me a summary\" - Project overview

Team Insights:
• \"Show tasks for [user]\" - Individual workload
• \"Show workload distribution\" - Team balance
• \"Average resolved per week\" - Weekly throughput

Search & Analysis:
• Search by task ID, title, or keywords
• \"How many tasks are there?\" - Counts per assignee
• \"What is urgent?\" - Work that needs attention

Task Management:
• \"Create task: [title]\" - Task creation guidance";

/// Fixed intent -> visualization mapping the dashboard relies on.
pub fn chart_for(intent: &Intent) -> Option<ChartKind> {
    match intent {
        Intent::InProgress => Some(ChartKind::Timeline),
        Intent::ToDo => Some(ChartKind::Table),
        Intent::Done => Some(ChartKind::Pie),
        Intent::Summary => Some(ChartKind::Pie),
        Intent::AssigneeLookup { .. } | Intent::Workload => Some(ChartKind::Bar),
        Intent::WeeklyAnalytics { .. } => Some(ChartKind::WeeklyTrend),
        Intent::Priority => Some(ChartKind::Table),
        Intent::Search { .. } => Some(ChartKind::Table),
        Intent::CreateTask { .. } | Intent::Help | Intent::Unknown { .. } => None,
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn bullet_list(tasks: &[&Task]) -> String {
    tasks
        .iter()
        .map(|t| format!("• {}: {}", t.id, t.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rule-based response builder. Stateless apart from the analytics window.
#[derive(Debug, Clone)]
pub struct ResponseSynthesizer {
    weeks: u32,
}

impl Default for ResponseSynthesizer {
    fn default() -> Self {
        Self::new(4)
    }
}

impl ResponseSynthesizer {
    pub fn new(weeks: u32) -> Self {
        Self { weeks }
    }

    pub fn synthesize(&self, intent: &Intent, tasks: &[Task]) -> ResponseResult {
        self.synthesize_at(intent, tasks, Utc::now())
    }

    /// Deterministic form: `now` only matters for weekly analytics.
    pub fn synthesize_at(&self, intent: &Intent, tasks: &[Task], now: DateTime<Utc>) -> ResponseResult {
        let result = match intent {
            Intent::InProgress | Intent::ToDo | Intent::Done => {
                let status = intent.status_filter().unwrap_or(TaskStatus::ToDo);
                self.status(&status, tasks)
            }
            Intent::Summary => self.summary(tasks),
            Intent::AssigneeLookup { assignee } => self.assignee(assignee, tasks),
            Intent::WeeklyAnalytics { assignee } => self.weekly(assignee.as_deref(), tasks, now),
            Intent::Workload => self.workload(tasks),
            Intent::Priority => self.priority(tasks),
            Intent::CreateTask { title } => self.create(title.as_deref()),
            Intent::Search { term } => self.search(term, tasks),
            Intent::Help => ResponseResult::new(HELP_TEXT, tasks.len())
                .actions(&["Try a sample query", "View task summary", "Create new task"]),
            Intent::Unknown { query } => ResponseResult::new(
                format!(
                    "I don't understand \"{query}\". Try asking about task status, assignments, or project summaries. Type 'help' to see what I can do!"
                ),
                0,
            )
            .actions(&["Ask for help", "Try different query", "View all tasks"]),
        };

        result.chart(chart_for(intent))
    }

    fn status(&self, status: &TaskStatus, tasks: &[Task]) -> ResponseResult {
        let matched = filter_by_status(tasks, status);
        if matched.is_empty() {
            return ResponseResult::new(format!("There are no tasks currently marked as '{status}'."), 0)
                .actions(&["View all tasks", "Check other statuses"]);
        }

        let text = format!(
            "Found {} task{} with status '{}':\n\n{}",
            matched.len(),
            plural(matched.len()),
            status,
            bullet_list(&matched)
        );

        let mut actions = vec!["View task details", "Update task status"];
        match status {
            TaskStatus::ToDo => actions.push("Start working on task"),
            TaskStatus::InProgress => actions.push("Mark task as done"),
            _ => {}
        }
        ResponseResult::new(text, matched.len()).actions(&actions)
    }

    fn summary(&self, tasks: &[Task]) -> ResponseResult {
        let counts = status_counts(tasks);
        let total = tasks.len();

        let mut text = format!("Project Overview:\n\nTotal Tasks: {total}\n");
        for (status, count) in &counts {
            let _ = writeln!(text, "{status}: {count}");
        }
        if let Some(done) = counts.get(TaskStatus::DONE) {
            let rate = (*done as f64 / total as f64 * 100.0).round() as u64;
            let _ = write!(text, "\nCompletion Rate: {rate}%");
        }

        let insights = analyze(tasks).insights;
        if !insights.is_empty() {
            text.push_str("\n\nInsights:\n");
            text.push_str(
                &insights
                    .iter()
                    .map(|i| format!("• {i}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            );
        }

        ResponseResult::new(text.trim_end(), total)
            .actions(&["View detailed breakdown", "Check assignee workload", "Export report"])
            .data(ChartData::Counts(counts))
    }

    fn assignee(&self, assignee: &str, tasks: &[Task]) -> ResponseResult {
        let matched = filter_by_assignee(tasks, assignee);
        if matched.is_empty() {
            return ResponseResult::new(format!("{assignee} doesn't have any tasks assigned currently."), 0)
                .actions(&["Assign new task", "View all assignees"]);
        }

        let counts = status_counts(matched.iter().copied());
        let mut text = format!(
            "{assignee} has {} task{} assigned:\n\n",
            matched.len(),
            plural(matched.len())
        );
        for (status, count) in &counts {
            let _ = writeln!(text, "• {count} {status}");
        }

        ResponseResult::new(text.trim_end(), matched.len())
            .actions(&["View task details", "Reassign tasks", "Check workload balance"])
            .data(ChartData::Counts(counts))
    }

    fn workload(&self, tasks: &[Task]) -> ResponseResult {
        let mut counts = assignee_counts(tasks, false);
        if counts.is_empty() {
            return ResponseResult::new("No tasks are currently assigned.", tasks.len())
                .actions(&["Assign tasks", "Create new tasks"]);
        }
        counts.sort_keys();

        let mut text = String::from("Current workload distribution:\n\n");
        for (assignee, count) in &counts {
            let _ = writeln!(text, "• {assignee}: {count} task{}", plural(*count));
        }
        let unassigned = tasks.len() - counts.values().sum::<usize>();
        if unassigned > 0 {
            let _ = write!(text, "\n{unassigned} task{} without an assignee.", plural(unassigned));
        }

        ResponseResult::new(text.trim_end(), tasks.len())
            .actions(&["Balance workload", "Reassign tasks", "View individual assignments"])
            .data(ChartData::Counts(counts))
    }

    /// No priority ordering is guaranteed upstream, so in-progress work
    /// stands in for urgency.
    fn priority(&self, tasks: &[Task]) -> ResponseResult {
        let active = filter_by_status(tasks, &TaskStatus::InProgress);
        if active.is_empty() {
            return ResponseResult::new(
                "No tasks are currently in progress, so nothing is flagged as urgent. Pick the next item from the To Do list to get work moving.",
                0,
            )
            .actions(&["View To Do tasks", "Start working on task"]);
        }

        let text = format!(
            "{} task{} in progress and need{} attention first:\n\n{}\n\nUrgency is based on work already in progress.",
            active.len(),
            if active.len() == 1 { " is" } else { "s are" },
            if active.len() == 1 { "s" } else { "" },
            bullet_list(&active)
        );
        ResponseResult::new(text, active.len())
            .actions(&["View task details", "Mark task as done", "Check assignee workload"])
    }

    fn create(&self, title: Option<&str>) -> ResponseResult {
        match title {
            Some(title) => ResponseResult::new(
                format!(
                    "I can help you create a task with the title: \"{title}\"\n\n\
                     To create it, send POST /tasks with:\n\
                     - Title: {title}\n\
                     - Status: To Do (default)\n\
                     - Assignee: (to be specified)\n\n\
                     Would you like to add an assignee or description?"
                ),
                0,
            )
            .actions(&["Set assignee", "Add description", "Create task via API"]),
            None => ResponseResult::new(
                "I can help you create a new task! Please specify the task title, for example: 'Create task: Fix login bug'",
                0,
            )
            .actions(&["Specify task title", "View existing tasks"]),
        }
    }

    fn search(&self, term: &str, tasks: &[Task]) -> ResponseResult {
        let matched = search(tasks, term);
        if matched.is_empty() {
            return ResponseResult::new(format!("No tasks match \"{term}\"."), 0)
                .actions(&["Refine search", "View all tasks"]);
        }

        let preview = matched
            .iter()
            .take(SEARCH_PREVIEW)
            .map(|t| format!("• {}: {} ({})", t.id, t.title, t.status))
            .collect::<Vec<_>>()
            .join("\n");
        let mut text = format!(
            "Found {} task{} matching \"{term}\":\n\n{preview}",
            matched.len(),
            plural(matched.len())
        );
        if matched.len() > SEARCH_PREVIEW {
            let _ = write!(text, "\n...and {} more", matched.len() - SEARCH_PREVIEW);
        }

        ResponseResult::new(text, matched.len())
            .actions(&["View task details", "Refine search", "Filter results"])
    }

    fn weekly(&self, assignee: Option<&str>, tasks: &[Task], now: DateTime<Utc>) -> ResponseResult {
        let result = weekly_resolved(tasks, self.weeks, assignee, now);

        let scope = assignee.map(|a| format!(" for {a}")).unwrap_or_default();
        let mut text = format!(
            "Resolved tasks over the last {} week{}{scope}:\n\nTotal resolved: {}\nAverage per week: {:.1}\n",
            result.weeks_analyzed,
            plural(result.weeks_analyzed as usize),
            result.total_resolved,
            result.average_per_week
        );
        if !result.weekly_breakdown.is_empty() {
            text.push('\n');
            for (week, count) in &result.weekly_breakdown {
                let _ = writeln!(text, "• Week of {week}: {count}");
            }
        }

        ResponseResult::new(text.trim_end(), result.total_resolved)
            .actions(&["View resolved tasks", "Compare assignees", "Check workload"])
            .data(ChartData::Weekly(result))
    }
}
