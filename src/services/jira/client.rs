use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::{debug, info, warn};

use super::issue::{CreatedIssue, JiraIssue, SearchResponse, ISSUE_FIELDS};
use crate::config::JiraConfig;
use crate::error::StoreError;
use crate::tasks::{NewTask, SearchPage, Task, TaskFilter, TaskStore};

const DEFAULT_PAGE: usize = 100;

/// `ABC-123` style keys or bare numeric issue ids.
static ISSUE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z][A-Za-z0-9_]*-[0-9]+|[0-9]+)$").expect("static regex"));

/// Only issue keys are ever placed in a request path.
pub fn is_issue_key(id: &str) -> bool {
    ISSUE_KEY.is_match(id)
}

/// Task store backed by the Jira REST API (v2).
#[derive(Clone)]
pub struct JiraTaskStore {
    client: Client,
    base_url: String,
    username: String,
    api_token: String,
    project_key: Option<String>,
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

impl JiraTaskStore {
    pub fn new(config: &JiraConfig) -> Self {
        info!("Jira task store targeting {}", config.server);
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            base_url: config.server.clone(),
            username: config.username.clone(),
            api_token: config.api_token.clone(),
            project_key: config.project_key.clone(),
        }
    }

    /// JQL equivalent of a `TaskFilter`, scoped to the configured project.
    pub fn filter_jql(&self, filter: &TaskFilter) -> String {
        let mut parts = Vec::new();
        if let Some(key) = &self.project_key {
            parts.push(format!("project = {key}"));
        }
        if let Some(status) = &filter.status {
            parts.push(format!("status = {}", quote(status)));
        }
        if let Some(assignee) = &filter.assignee {
            parts.push(format!("assignee = {}", quote(assignee)));
        }

        if parts.is_empty() {
            "ORDER BY created DESC".to_string()
        } else {
            format!("{} ORDER BY created DESC", parts.join(" AND "))
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/2/{}", self.base_url, path)
    }

    async fn search(&self, jql: &str, start_at: usize, max_results: usize) -> Result<SearchResponse, StoreError> {
        debug!("Jira search: {}", jql);
        let response = self
            .client
            .get(self.url("search"))
            .basic_auth(&self.username, Some(&self.api_token))
            .query(&[
                ("jql", jql.to_string()),
                ("startAt", start_at.to_string()),
                ("maxResults", max_results.to_string()),
                ("fields", ISSUE_FIELDS.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }
        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TaskStore for JiraTaskStore {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let page = self.search(&self.filter_jql(filter), 0, DEFAULT_PAGE).await?;
        Ok(page.issues.into_iter().map(Task::from).collect())
    }

    async fn get_task(&self, id: &str) -> Result<Task, StoreError> {
        if !is_issue_key(id) {
            warn!("Rejecting malformed issue key {:?}", id);
            return Err(StoreError::NotFound(id.to_string()));
        }

        let response = self
            .client
            .get(self.url(&format!("issue/{id}")))
            .basic_auth(&self.username, Some(&self.api_token))
            .query(&[("fields", ISSUE_FIELDS)])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id.to_string())),
            s if !s.is_success() => Err(StoreError::Status(s)),
            _ => response
                .json::<JiraIssue>()
                .await
                .map(Task::from)
                .map_err(|e| StoreError::Decode(e.to_string())),
        }
    }

    async fn create_task(&self, new: NewTask) -> Result<Task, StoreError> {
        let mut fields = json!({
            "summary": new.title.trim(),
            "description": new.description.unwrap_or_default(),
            "issuetype": { "name": "Task" },
        });
        if let Some(key) = &self.project_key {
            fields["project"] = json!({ "key": key });
        }
        if let Some(assignee) = new.assignee.filter(|a| !a.trim().is_empty()) {
            fields["assignee"] = json!({ "name": assignee });
        }

        let response = self
            .client
            .post(self.url("issue"))
            .basic_auth(&self.username, Some(&self.api_token))
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status()));
        }
        let created: CreatedIssue = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        info!("Created Jira issue {}", created.key);
        self.get_task(&created.key).await
    }

    async fn search_jql(
        &self,
        jql: &str,
        start_at: usize,
        max_results: usize,
    ) -> Result<SearchPage, StoreError> {
        let page = self.search(jql, start_at, max_results).await?;
        Ok(SearchPage {
            total: page.total,
            issues: page.issues.into_iter().map(Task::from).collect(),
        })
    }
}
