use std::fmt::Write as _;

use crate::analytics::{assignee_counts, status_counts};
use crate::tasks::Task;

const RECENT_TASKS: usize = 5;

const RESPONSE_PREFIXES: &[&str] = &["Assistant:", "AI:", "Response:", "Answer:"];

/// Snapshot summary handed to the model as context.
pub fn task_digest(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No task data available.".to_string();
    }

    let join = |counts: indexmap::IndexMap<String, usize>| {
        counts
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut digest = format!(
        "Current Project Status:\n- Total Tasks: {}\n- Status Breakdown: {}\n- Assignee Distribution: {}\n\nRecent Tasks:\n",
        tasks.len(),
        join(status_counts(tasks)),
        join(assignee_counts(tasks, true)),
    );
    for task in tasks.iter().take(RECENT_TASKS) {
        let _ = writeln!(
            digest,
            "- {}: {} (Status: {}, Assignee: {})",
            task.id,
            task.title,
            task.status,
            task.assignee.as_deref().unwrap_or("Unassigned")
        );
    }
    digest
}

pub fn conversation_prompt(query: &str, context: Option<&str>) -> String {
    format!(
        "You are an AI assistant helping with Jira project management. Use the project data above to answer questions about tasks, project status, and team workload.

Instructions:
- Be helpful and informative
- Provide specific data when available
- Keep responses concise but complete
- If asked to create tasks, provide guidance on the process

Context: {}

User Query: {}

Response:",
        context.filter(|c| !c.trim().is_empty()).unwrap_or("General project management inquiry"),
        query.trim()
    )
}

/// Strip role prefixes the model sometimes echoes back.
pub fn clean_response(raw: &str) -> String {
    let mut text = raw.trim();
    for prefix in RESPONSE_PREFIXES {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest.trim();
        }
    }
    text.to_string()
}
