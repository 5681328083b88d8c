/// HTTP API layer
///
/// REST endpoints for the dashboard: project CRUD, analysis triggering,
/// plugin generation/download/preview, and the stats/activity aggregates.
/// All handlers share one AppState and return JSON bodies; errors are
/// `{"error": "..."}` with the appropriate status code.

pub mod analysis;
pub mod dashboard;
pub mod plugins;
pub mod projects;

use crate::analysis::{AnalysisService, FunctionMapStorage};
use crate::dashboard::DashboardStorage;
use crate::plugin::PluginStorage;
use crate::project::ProjectStorage;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Project persistence
    pub projects: ProjectStorage,
    /// Function map persistence
    pub functions: FunctionMapStorage,
    /// Plugin config persistence
    pub plugins: PluginStorage,
    /// Read-only aggregates for the dashboard
    pub dashboard: DashboardStorage,
    /// Analysis orchestration over the fetch and LLM boundaries
    pub analyzer: AnalysisService,
}

/// Error body shared by all handlers
pub type ApiError = (StatusCode, Json<Value>);

/// Build an error response with a generic, client-safe message
///
/// Detailed causes are logged server-side at the call site, never returned.
pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}
