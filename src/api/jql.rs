use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;
use crate::services::jql::query_suggestions;
use crate::tasks::{Task, TaskStore};

const MAX_RESULTS_LIMIT: usize = 1_000;
const MAX_JQL_LEN: usize = 2_000;

fn default_max_results() -> usize {
    50
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub natural_language: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub start_at: usize,
}

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub jql: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub start_at: usize,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JqlResponse {
    pub jql_query: String,
    pub natural_language: String,
    pub issues: Vec<Task>,
    pub total_count: usize,
    pub start_at: usize,
    pub max_results: usize,
    pub explanation: String,
    pub suggestions: Vec<String>,
}

fn check_page(max_results: usize) -> Result<(), ApiError> {
    if max_results == 0 || max_results > MAX_RESULTS_LIMIT {
        return Err(ApiError::BadRequest(format!(
            "max_results must be between 1 and {MAX_RESULTS_LIMIT}"
        )));
    }
    Ok(())
}

pub async fn convert(
    State(state): State<AppState>,
    Json(req): Json<ConvertRequest>,
) -> Result<Json<JqlResponse>, ApiError> {
    if req.natural_language.trim().is_empty() {
        return Err(ApiError::BadRequest("natural_language must not be empty".into()));
    }
    check_page(req.max_results)?;

    let translation = state
        .jql
        .convert(&req.natural_language, req.context.as_deref())
        .await;
    let page = state
        .store
        .search_jql(&translation.jql, req.start_at, req.max_results)
        .await?;

    Ok(Json(JqlResponse {
        jql_query: translation.jql,
        natural_language: req.natural_language,
        issues: page.issues,
        total_count: page.total,
        start_at: req.start_at,
        max_results: req.max_results,
        explanation: translation.explanation,
        suggestions: query_suggestions(),
    }))
}

pub async fn execute(
    State(state): State<AppState>,
    Json(req): Json<ExecuteRequest>,
) -> Result<Json<JqlResponse>, ApiError> {
    let jql = req.jql.trim();
    if jql.is_empty() || jql.len() > MAX_JQL_LEN {
        return Err(ApiError::BadRequest(format!(
            "jql must be between 1 and {MAX_JQL_LEN} characters"
        )));
    }
    check_page(req.max_results)?;

    let page = state.store.search_jql(jql, req.start_at, req.max_results).await?;
    Ok(Json(JqlResponse {
        jql_query: jql.to_string(),
        natural_language: "Direct JQL execution".to_string(),
        issues: page.issues,
        total_count: page.total,
        start_at: req.start_at,
        max_results: req.max_results,
        explanation: format!("Executed JQL query: {jql}"),
        suggestions: Vec::new(),
    }))
}

/// The list is static; the current query is accepted for API compatibility.
pub async fn suggestions(Query(_params): Query<SuggestionParams>) -> Json<Vec<String>> {
    Json(query_suggestions())
}
