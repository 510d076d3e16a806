use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::tasks::{Priority, Task, TaskStatus};

/// Fields requested from Jira; everything else is ignored.
pub const ISSUE_FIELDS: &str = "summary,description,status,assignee,priority,created,updated,resolutiondate,duedate";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

#[derive(Debug, Deserialize)]
pub struct JiraIssue {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    /// Plain string on API v2; anything else (ADF) is dropped.
    #[serde(default)]
    pub description: Option<Value>,
    pub status: Option<Named>,
    #[serde(default)]
    pub assignee: Option<JiraUser>,
    #[serde(default)]
    pub priority: Option<Named>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub resolutiondate: Option<String>,
    #[serde(default)]
    pub duedate: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedIssue {
    pub key: String,
}

/// Jira writes `2024-06-01T10:00:00.000+0000`; due dates are plain dates.
pub fn parse_jira_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
        })
}

impl From<JiraIssue> for Task {
    fn from(issue: JiraIssue) -> Self {
        let f = issue.fields;
        let time = |raw: &Option<String>| raw.as_deref().and_then(parse_jira_time);

        let mut task = Task::new(
            issue.key,
            f.summary,
            f.status.map_or_else(|| TaskStatus::Other("Unknown".into()), |s| TaskStatus::parse(&s.name)),
        );
        task.description = f
            .description
            .as_ref()
            .and_then(Value::as_str)
            .filter(|d| !d.trim().is_empty())
            .map(str::to_string);
        task.assignee = f
            .assignee
            .and_then(|u| u.email_address.or(u.display_name).or(u.name));
        task.priority = f.priority.map(|p| Priority::from(p.name));
        task.created_date = time(&f.created);
        task.updated_date = time(&f.updated);
        task.resolved_date = time(&f.resolutiondate);
        task.due_date = time(&f.duedate);
        task
    }
}
