use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Jira workflow status. The three canonical names are modelled explicitly,
/// anything else is kept verbatim so custom workflows survive a round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Done,
    Other(String),
}

impl TaskStatus {
    pub const TO_DO: &'static str = "To Do";
    pub const IN_PROGRESS: &'static str = "In Progress";
    pub const DONE: &'static str = "Done";

    /// Case-sensitive: "in progress" is NOT `InProgress`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::TO_DO => Self::ToDo,
            Self::IN_PROGRESS => Self::InProgress,
            Self::DONE => Self::Done,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ToDo => Self::TO_DO,
            Self::InProgress => Self::IN_PROGRESS,
            Self::Done => Self::DONE,
            Self::Other(s) => s,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Lowest,
    Low,
    Medium,
    High,
    Highest,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Lowest => "Lowest",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Highest => "Highest",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Lowest" => Self::Lowest,
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            "Highest" => Self::Highest,
            _ => Self::Other(raw),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

/// A single task record as served by the task store.
/// Read-only from the query pipeline's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Bare task with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status,
            assignee: None,
            description: None,
            priority: None,
            created_date: None,
            updated_date: None,
            start_date: None,
            due_date: None,
            resolved_date: None,
        }
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn resolved_at(mut self, at: DateTime<Utc>) -> Self {
        self.resolved_date = Some(at);
        self
    }

    pub fn assigned_to(&self, assignee: &str) -> bool {
        self.assignee.as_deref() == Some(assignee)
    }
}

/// Payload for creating a task through the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl NewTask {
    pub const MAX_TITLE_LEN: usize = 200;

    pub fn validate(&self) -> Result<(), String> {
        let len = self.title.trim().chars().count();
        if len == 0 {
            return Err("title must not be empty".to_string());
        }
        if len > Self::MAX_TITLE_LEN {
            return Err(format!("title must be at most {} characters", Self::MAX_TITLE_LEN));
        }
        Ok(())
    }
}

/// Optional constraints for `TaskStore::list_tasks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl TaskFilter {
    /// Status compares case-insensitively, assignee exactly.
    pub fn matches(&self, task: &Task) -> bool {
        let status_ok = self
            .status
            .as_deref()
            .map_or(true, |s| task.status.as_str().eq_ignore_ascii_case(s));
        let assignee_ok = self
            .assignee
            .as_deref()
            .map_or(true, |a| task.assigned_to(a));
        status_ok && assignee_ok
    }

    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|t| self.matches(t)).collect()
    }
}

/// One page of a JQL search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub issues: Vec<Task>,
    pub total: usize,
}
