use serde::{Deserialize, Serialize};

use crate::tasks::TaskStatus;

/// A raw user question plus an optional free-form hint for the LLM.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    #[serde(default)]
    pub context: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Classified purpose of a query, with whatever parameters the matching
/// rule extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    CreateTask { title: Option<String> },
    InProgress,
    ToDo,
    Done,
    Summary,
    AssigneeLookup { assignee: String },
    WeeklyAnalytics { assignee: Option<String> },
    Workload,
    Priority,
    Help,
    Search { term: String },
    Unknown { query: String },
}

impl Intent {
    pub fn tag(&self) -> &'static str {
        match self {
            Intent::CreateTask { .. } => "create_task",
            Intent::InProgress => "in_progress",
            Intent::ToDo => "to_do",
            Intent::Done => "done",
            Intent::Summary => "summary",
            Intent::AssigneeLookup { .. } => "assignee_lookup",
            Intent::WeeklyAnalytics { .. } => "weekly_analytics",
            Intent::Workload => "workload",
            Intent::Priority => "priority",
            Intent::Help => "help",
            Intent::Search { .. } => "search",
            Intent::Unknown { .. } => "unknown",
        }
    }

    /// Canonical status for the three status-filter intents.
    pub fn status_filter(&self) -> Option<TaskStatus> {
        match self {
            Intent::InProgress => Some(TaskStatus::InProgress),
            Intent::ToDo => Some(TaskStatus::ToDo),
            Intent::Done => Some(TaskStatus::Done),
            _ => None,
        }
    }
}
