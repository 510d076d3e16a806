use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::llm::GenerativeBackend;
use crate::error::LlmError;

const ORDER_CLAUSE: &str = "ORDER BY created DESC";

/// First hit wins.
const STATUS_WORDS: &[(&str, &str)] = &[
    ("todo", "To Do"),
    ("open", "Open"),
    ("progress", "In Progress"),
    ("done", "Done"),
    ("closed", "Closed"),
];

const TIME_PHRASES: &[(&str, &str)] = &[
    ("today", "startOfDay()"),
    ("yesterday", "startOfDay(-1d)"),
    ("this week", "startOfWeek()"),
    ("last week", "startOfWeek(-1w)"),
    ("this month", "startOfMonth()"),
    ("last month", "startOfMonth(-1M)"),
];

static MY_TASKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmy\b|assigned to me").expect("static regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JqlSource {
    Llm,
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JqlTranslation {
    pub jql: String,
    pub explanation: String,
    pub source: JqlSource,
}

/// Natural language -> JQL. Asks the generative backend when there is one,
/// keyword patterns otherwise.
pub struct JqlConverter {
    backend: Option<Arc<dyn GenerativeBackend>>,
    project_key: Option<String>,
    timeout: Duration,
}

impl JqlConverter {
    pub fn new(
        backend: Option<Arc<dyn GenerativeBackend>>,
        project_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            backend,
            project_key,
            timeout,
        }
    }

    pub async fn convert(&self, natural_language: &str, context: Option<&str>) -> JqlTranslation {
        info!("Converting query to JQL: '{}'", natural_language);

        if let Some(backend) = self.backend.as_ref().filter(|b| b.is_available()) {
            let attempt = tokio::time::timeout(
                self.timeout,
                self.convert_with_llm(backend.as_ref(), natural_language, context),
            )
            .await;
            match attempt {
                Ok(Ok(translation)) => return translation,
                Ok(Err(e)) => warn!("LLM JQL conversion failed: {}, falling back to patterns", e),
                Err(_) => warn!("LLM JQL conversion timed out, falling back to patterns"),
            }
        }

        self.convert_with_patterns(natural_language)
    }

    async fn convert_with_llm(
        &self,
        backend: &dyn GenerativeBackend,
        query: &str,
        context: Option<&str>,
    ) -> Result<JqlTranslation, LlmError> {
        let prompt = self.build_prompt(query, context);
        let raw = backend.generate(&prompt, "").await?;
        debug!("LLM raw JQL response: {}", raw);

        let (jql, explanation) = parse_llm_response(&raw);
        let jql = jql.and_then(|j| normalize_jql(&j)).ok_or(LlmError::NoJql)?;
        Ok(JqlTranslation {
            jql,
            explanation: explanation.unwrap_or_else(|| format!("Generated JQL for: {query}")),
            source: JqlSource::Llm,
        })
    }

    pub fn convert_with_patterns(&self, query: &str) -> JqlTranslation {
        let lower = query.to_lowercase();
        let mut parts: Vec<String> = Vec::new();
        let mut found: Vec<&str> = Vec::new();

        if let Some(key) = &self.project_key {
            parts.push(format!("project = {key}"));
            found.push("project");
        }

        if let Some((_, status)) = STATUS_WORDS.iter().find(|(word, _)| lower.contains(word)) {
            parts.push(format!("status = '{status}'"));
            found.push("status");
        }

        if let Some((_, func)) = TIME_PHRASES.iter().find(|(phrase, _)| lower.contains(phrase)) {
            parts.push(format!("created >= {func}"));
            found.push("created");
        }

        if lower.contains("unassigned") {
            parts.push("assignee is EMPTY".to_string());
            found.push("unassigned");
        } else if MY_TASKS.is_match(&lower) {
            parts.push("assignee = currentUser()".to_string());
            found.push("assignee");
        }

        if lower.contains("high priority") || lower.contains("urgent") {
            parts.push("priority = High".to_string());
            found.push("priority");
        }

        if lower.contains("bug") {
            parts.push("issuetype = Bug".to_string());
            found.push("issuetype");
        } else if lower.contains("task") {
            parts.push("issuetype = Task".to_string());
            found.push("issuetype");
        }

        let jql = if parts.is_empty() {
            ORDER_CLAUSE.to_string()
        } else {
            format!("{} {ORDER_CLAUSE}", parts.join(" AND "))
        };
        let explanation = if found.is_empty() {
            "Pattern matching found: no specific patterns".to_string()
        } else {
            format!("Pattern matching found: {}", found.join(", "))
        };

        debug!("Pattern JQL: '{}'", jql);
        JqlTranslation {
            jql,
            explanation,
            source: JqlSource::Pattern,
        }
    }

    fn build_prompt(&self, query: &str, context: Option<&str>) -> String {
        let project_filter = self
            .project_key
            .as_ref()
            .map(|k| format!("project = {k} AND "))
            .unwrap_or_default();
        let project_note = if project_filter.is_empty() {
            String::new()
        } else {
            format!("Project context: Always include {project_filter}\n\n")
        };

        format!(
            r#"Convert this natural language query to valid JQL (Jira Query Language).

Query: "{query}"
Context: {context}

JQL Guidelines:
- Common fields: project, status, assignee, priority, issuetype, created, updated, summary, description
- Status values: "To Do", "In Progress", "Done", "Open", "Closed", "Resolved"
- Priority values: "Lowest", "Low", "Medium", "High", "Highest"
- Time functions: startOfDay(), startOfWeek(), startOfMonth(), startOfYear()
- Assignee: assignee = "username" or assignee is EMPTY for unassigned

{project_note}Examples:
"unassigned high priority bugs" -> {project_filter}assignee is EMPTY AND priority = High AND issuetype = Bug ORDER BY created DESC
"my tasks in progress" -> {project_filter}assignee = currentUser() AND status = "In Progress" ORDER BY created DESC

Respond in this exact format:
JQL: [your JQL query]
Explanation: [brief explanation]"#,
            context = context.unwrap_or("General Jira issue search"),
        )
    }
}

/// Pull `JQL:` and `Explanation:` lines out of a completion. Without an
/// explicit prefix the first line that looks like JQL is taken.
pub fn parse_llm_response(response: &str) -> (Option<String>, Option<String>) {
    let mut jql: Option<String> = None;
    let mut explanation = None;

    for line in response.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("JQL:") {
            jql = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("Explanation:") {
            explanation = Some(rest.trim().to_string());
        } else if jql.is_none() && (line.contains('=') || line.contains("ORDER BY") || line.contains("project")) {
            jql = Some(line.to_string());
        }
    }

    if jql.is_none() {
        jql = response
            .lines()
            .map(str::trim)
            .find(|line| {
                let upper = line.to_uppercase();
                ["PROJECT", "STATUS", "ASSIGNEE", "CREATED", "ORDER BY"]
                    .iter()
                    .any(|k| upper.contains(k))
            })
            .map(str::to_string);
    }

    (jql.filter(|j| !j.is_empty()), explanation.filter(|e| !e.is_empty()))
}

/// Collapse whitespace, drop wrapping quotes, ensure an ORDER BY clause.
pub fn normalize_jql(jql: &str) -> Option<String> {
    let collapsed = WHITESPACE.replace_all(jql.trim(), " ").to_string();
    let unquoted = collapsed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(&collapsed)
        .trim()
        .to_string();

    if unquoted.is_empty() || ["none", "null", "empty"].contains(&unquoted.to_lowercase().as_str()) {
        return None;
    }
    if unquoted.to_uppercase().contains("ORDER BY") {
        Some(unquoted)
    } else {
        Some(format!("{unquoted} {ORDER_CLAUSE}"))
    }
}

pub fn query_suggestions() -> Vec<String> {
    [
        "Show unassigned items",
        "Add time filter (this week, last month)",
        "Filter by status (in progress, done)",
        "Filter by priority (high, urgent)",
        "Show my assigned tasks",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
