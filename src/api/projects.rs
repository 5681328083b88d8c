/// Project management REST endpoints
///
/// POST /api/projects           create a project
/// GET  /api/projects           list all projects
/// GET  /api/projects/{id}      fetch one project
/// GET  /api/projects/{id}/functions   list its analyzed functions

use crate::api::{api_error, ApiError, AppState};
use crate::project::types::NewProject;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

/// Create project management routes
pub fn create_project_routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects", post(create_project))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{id}", get(get_project))
        .route("/api/projects/{id}/functions", get(list_project_functions))
}

/// Create a new project
///
/// Body: { "name": "...", "description": "...", "url": "...", "project_type": "website" }
async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<NewProject>,
) -> Result<Json<Value>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Project name is required"));
    }

    match state.projects.create_project(&payload).await {
        Ok(project) => {
            tracing::info!("📁 Created project {} ({})", project.id, project.name);
            Ok(Json(json!(project)))
        }
        Err(e) => {
            tracing::error!("Failed to create project: {:#}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create project"))
        }
    }
}

/// List all projects, newest first
async fn list_projects(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.projects.list_projects().await {
        Ok(projects) => Ok(Json(json!({ "projects": projects }))),
        Err(e) => {
            tracing::error!("Failed to list projects: {:#}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch projects"))
        }
    }
}

/// Get a specific project by id
async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    match state.projects.get_project(id).await {
        Ok(Some(project)) => Ok(Json(json!(project))),
        Ok(None) => Err(api_error(StatusCode::NOT_FOUND, "Project not found")),
        Err(e) => {
            tracing::error!("Failed to get project {}: {:#}", id, e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch project"))
        }
    }
}

/// List the function maps discovered for a project
async fn list_project_functions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    match state.functions.list_by_project(id).await {
        Ok(functions) => Ok(Json(json!({ "functions": functions }))),
        Err(e) => {
            tracing::error!("Failed to list functions for project {}: {:#}", id, e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch function maps"))
        }
    }
}
