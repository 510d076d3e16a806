//! HTTP surface for the dashboard.

pub mod conversation;
pub mod jql;
pub mod state;
pub mod tasks;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

pub use state::AppState;

pub const SERVICE_NAME: &str = "Jira Helper API";

pub fn router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/analytics/weekly-resolved", get(tasks::weekly_resolved))
        .route("/tasks/{id}", get(tasks::get_task))
        .route("/ai/query", post(conversation::query))
        .route("/ai/analyze", get(conversation::analyze))
        .route(
            "/ai/history",
            get(conversation::history).delete(conversation::clear_history),
        )
        .route("/jql/convert", post(jql::convert))
        .route("/jql/execute", post(jql::execute))
        .route("/jql/suggestions", get(jql::suggestions))
        .layer(cors(cors_origin))
        .with_state(state)
}

fn cors(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any origin", origin);
            layer.allow_origin(Any)
        }
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to {SERVICE_NAME}"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
