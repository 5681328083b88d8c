/// Dashboard aggregate endpoints
///
/// GET /api/stats      headline counters
/// GET /api/activity   recent event feed

use crate::api::{api_error, ApiError, AppState};
use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};

/// Default number of events returned by the activity feed
const DEFAULT_ACTIVITY_LIMIT: i64 = 10;

/// Create dashboard aggregate routes
pub fn create_dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/api/stats", get(get_stats))
        .route("/api/activity", get(get_activity))
}

/// Fetch headline statistics
async fn get_stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.dashboard.project_stats().await {
        Ok(stats) => Ok(Json(json!(stats))),
        Err(e) => {
            tracing::error!("Failed to compute stats: {:#}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch statistics"))
        }
    }
}

/// Fetch the recent activity feed
async fn get_activity(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.dashboard.recent_activity(DEFAULT_ACTIVITY_LIMIT).await {
        Ok(activities) => Ok(Json(json!({ "activities": activities }))),
        Err(e) => {
            tracing::error!("Failed to fetch activity: {:#}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch activity"))
        }
    }
}
