/// Plugin generation and delivery endpoints
///
/// POST /api/plugin/generate        render and persist a plugin for a project
/// GET  /api/plugin/download/{id}   raw script with attachment headers
/// GET  /api/plugin/preview/{id}    plugin metadata plus code as JSON
/// GET  /api/plugins                all plugins joined with project names

use crate::api::{api_error, ApiError, AppState};
use crate::plugin::generator::PluginGenerator;
use crate::plugin::types::NewPluginConfig;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Request body for plugin generation
///
/// `features` is optional: omitting it requests the basic template, while a
/// present (even empty) array requests the advanced template.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePluginRequest {
    pub project_id: Option<i64>,
    pub plugin_name: Option<String>,
    pub features: Option<Vec<String>>,
}

/// Create plugin management routes
pub fn create_plugin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/plugin/generate", post(generate_plugin))
        .route("/api/plugin/download/{id}", get(download_plugin))
        .route("/api/plugin/preview/{id}", get(preview_plugin))
        .route("/api/plugins", get(list_plugins))
}

/// Generate a plugin for a project and store it as a new config
///
/// Body: { "projectId": 1, "pluginName": "My Plugin", "features": ["error-tracking"] }
/// Returns: { "message": "...", "pluginId": n, "downloadUrl": "/api/plugin/download/n" }
async fn generate_plugin(
    State(state): State<AppState>,
    Json(payload): Json<GeneratePluginRequest>,
) -> Result<Json<Value>, ApiError> {
    let (project_id, plugin_name) = match (payload.project_id, payload.plugin_name.as_deref()) {
        (Some(id), Some(name)) if !name.trim().is_empty() => (id, name),
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Project ID and plugin name are required",
            ))
        }
    };

    let project = match state.projects.get_project(project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => return Err(api_error(StatusCode::NOT_FOUND, "Project not found")),
        Err(e) => {
            tracing::error!("Failed to load project {}: {:#}", project_id, e);
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate plugin"));
        }
    };

    let functions = match state.functions.list_by_project(project_id).await {
        Ok(functions) => functions,
        Err(e) => {
            tracing::error!("Failed to load function maps for project {}: {:#}", project_id, e);
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate plugin"));
        }
    };

    let generated = PluginGenerator::generate(
        &project,
        &functions,
        plugin_name,
        payload.features.as_deref(),
        chrono::Utc::now(),
    );

    let config = match state
        .plugins
        .create_plugin_config(&NewPluginConfig {
            project_id,
            config_name: plugin_name.to_string(),
            plugin_code: generated.code,
            version: generated.version,
            is_active: true,
        })
        .await
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to store plugin config: {:#}", e);
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate plugin"));
        }
    };

    tracing::info!(
        "🔌 Generated plugin {} ('{}' v{}) for project {}",
        config.id,
        config.config_name,
        config.version,
        project_id
    );

    Ok(Json(json!({
        "message": "Plugin generated successfully",
        "pluginId": config.id,
        "downloadUrl": format!("/api/plugin/download/{}", config.id),
    })))
}

/// Download a plugin as a JavaScript attachment
///
/// The filename repeats the config name and version already embedded in the
/// script's header comment.
async fn download_plugin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let config = match state.plugins.get_plugin_config(id).await {
        Ok(Some(config)) => config,
        Ok(None) => return Err(api_error(StatusCode::NOT_FOUND, "Plugin not found")),
        Err(e) => {
            tracing::error!("Failed to load plugin {}: {:#}", id, e);
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to download plugin"));
        }
    };

    let headers = [
        (header::CONTENT_TYPE, "application/javascript".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", config.file_name()),
        ),
        (header::CACHE_CONTROL, "no-cache".to_string()),
    ];

    Ok((headers, config.plugin_code).into_response())
}

/// Preview a plugin's metadata and code as JSON
async fn preview_plugin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    match state.plugins.get_plugin_config(id).await {
        Ok(Some(config)) => Ok(Json(json!({
            "id": config.id,
            "name": config.config_name,
            "version": config.version,
            "code": config.plugin_code,
            "created_at": config.created_at,
        }))),
        Ok(None) => Err(api_error(StatusCode::NOT_FOUND, "Plugin not found")),
        Err(e) => {
            tracing::error!("Failed to load plugin {}: {:#}", id, e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to preview plugin"))
        }
    }
}

/// List all plugins with their owning project names
async fn list_plugins(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.plugins.list_plugin_configs().await {
        Ok(plugins) => Ok(Json(json!({ "plugins": plugins }))),
        Err(e) => {
            tracing::error!("Failed to list plugins: {:#}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch plugins"))
        }
    }
}
