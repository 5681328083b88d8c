/// Analysis trigger endpoint
///
/// POST /api/analyze runs a full analysis for one project and walks its
/// status through analyzing → completed | failed. Domain failures from the
/// analysis boundary surface as 500 with the failure message.

use crate::api::{api_error, ApiError, AppState};
use crate::analysis::AnalysisOutcome;
use crate::project::ProjectStatus;
use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use serde_json::{json, Value};

/// Request body for analysis runs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub project_id: Option<i64>,
    pub analysis_type: Option<String>,
}

/// Create the analysis route
pub fn create_analysis_routes() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze_project))
}

/// Run analysis for a project
///
/// Body: { "projectId": 1, "analysisType": "full" }
/// Returns: { "message": "...", "functionCount": n, "analysisId": "..." }
async fn analyze_project(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<Value>, ApiError> {
    let project_id = payload
        .project_id
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Project ID is required"))?;
    let analysis_type = payload.analysis_type.as_deref().unwrap_or("full");

    let project = match state.projects.get_project(project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => return Err(api_error(StatusCode::NOT_FOUND, "Project not found")),
        Err(e) => {
            tracing::error!("Failed to load project {}: {:#}", project_id, e);
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch project"));
        }
    };

    if let Err(e) = state.projects.update_status(project_id, ProjectStatus::Analyzing).await {
        tracing::error!("Failed to mark project {} analyzing: {:#}", project_id, e);
        return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update project status"));
    }

    match state.analyzer.analyze_project(&project, analysis_type).await {
        AnalysisOutcome::Completed { function_count, analysis_id } => {
            if let Err(e) = state.projects.update_status(project_id, ProjectStatus::Completed).await {
                tracing::error!("Failed to mark project {} completed: {:#}", project_id, e);
                return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update project status"));
            }

            Ok(Json(json!({
                "message": "Analysis completed successfully",
                "functionCount": function_count,
                "analysisId": analysis_id,
            })))
        }
        AnalysisOutcome::Failed { error } => {
            if let Err(e) = state.projects.update_status(project_id, ProjectStatus::Failed).await {
                tracing::error!("Failed to mark project {} failed: {:#}", project_id, e);
            }

            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, &error))
        }
    }
}
