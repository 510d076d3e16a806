use axum::{
    extract::{Query as QueryParams, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use super::AppState;
use crate::analytics::{analyze as analyze_tasks, TaskAnalysis};
use crate::error::ApiError;
use crate::history::HistoryEntry;
use crate::intent::Query;
use crate::response::{ChartData, ChartKind};

pub const MAX_QUERY_LEN: usize = 1_000;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
    pub query: String,
    pub task_count: usize,
    pub suggested_actions: Vec<String>,
    pub chart_recommendation: Option<ChartKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartData>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

pub async fn query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    if req.query.chars().count() > MAX_QUERY_LEN {
        return Err(ApiError::BadRequest(format!(
            "query must be at most {MAX_QUERY_LEN} characters"
        )));
    }
    info!("Processing query: '{}'", req.query);

    let mut query = Query::new(req.query.clone());
    if let Some(context) = req.context.filter(|c| !c.trim().is_empty()) {
        query = query.with_context(context);
    }

    let tasks = state.store.snapshot().await;
    let result = state.resolver.answer(&query, &tasks).await;
    state.history.write().await.record(&req.query, result.clone());

    Ok(Json(QueryResponse {
        response: result.text,
        query: req.query,
        task_count: result.task_count,
        suggested_actions: result.suggested_actions,
        chart_recommendation: result.chart_recommendation,
        chart_data: result.chart_data,
    }))
}

pub async fn analyze(State(state): State<AppState>) -> Json<TaskAnalysis> {
    let tasks = state.store.snapshot().await;
    Json(analyze_tasks(&tasks))
}

pub async fn history(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<HistoryParams>,
) -> Json<Vec<HistoryEntry>> {
    Json(state.history.read().await.recent(params.limit))
}

pub async fn clear_history(State(state): State<AppState>) -> Json<Value> {
    state.history.write().await.clear();
    info!("Conversation history cleared");
    Json(json!({ "message": "Conversation history cleared successfully" }))
}
