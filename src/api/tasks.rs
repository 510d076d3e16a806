use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::AppState;
use crate::analytics::{weekly_resolved as compute_weekly, AnalyticsResult, MAX_WEEKS};
use crate::error::ApiError;
use crate::tasks::{NewTask, Task, TaskFilter, TaskStore};

#[derive(Debug, Deserialize)]
pub struct WeeklyParams {
    pub assignee: Option<String>,
    pub weeks: Option<u32>,
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.store.list_tasks(&filter).await?))
}

pub async fn get_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.store.get_task(&id).await?))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(new): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    new.validate().map_err(ApiError::BadRequest)?;
    let task = state.store.create_task(new).await?;
    info!("Created task {}", task.id);
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn weekly_resolved(
    State(state): State<AppState>,
    Query(params): Query<WeeklyParams>,
) -> Result<Json<AnalyticsResult>, ApiError> {
    let weeks = match params.weeks {
        Some(weeks) if weeks > MAX_WEEKS => {
            return Err(ApiError::BadRequest(format!("weeks must be at most {MAX_WEEKS}")));
        }
        Some(weeks) => weeks,
        None => state.weeks.min(MAX_WEEKS),
    };

    let tasks = state.store.snapshot().await;
    let assignee = params.assignee.as_deref().map(str::trim).filter(|a| !a.is_empty());
    Ok(Json(compute_weekly(&tasks, weeks, assignee, Utc::now())))
}
