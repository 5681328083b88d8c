/// Server setup and initialization
///
/// Wires together all components: database pool, storage layers, analysis
/// service, and HTTP routes. Provides the main application factory function
/// for creating the Axum app.

use crate::{
    analysis::{AnalysisService, FunctionMapStorage},
    api::{
        analysis::create_analysis_routes, dashboard::create_dashboard_routes,
        plugins::create_plugin_routes, projects::create_project_routes, AppState,
    },
    config::Config,
    dashboard::DashboardStorage,
    db,
    plugin::PluginStorage,
    project::ProjectStorage,
};
use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;

/// Create the main Axum application with all routes
///
/// Opens the database, applies the schema, and wires the storage layers and
/// the analysis service into a complete application.
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("🗄️ Initializing database: {}", config.database.path);
    let pool = db::connect(&config.database.path).await
        .map_err(|e| anyhow::anyhow!("Failed to open database: {}", e))?;

    tracing::info!("📋 Applying schema");
    db::init_schema(&pool).await
        .map_err(|e| anyhow::anyhow!("Failed to initialize schema: {}", e))?;

    let functions = FunctionMapStorage::new(pool.clone());

    tracing::info!("🤖 Initializing analysis service (model: {})", config.analysis.model);
    if config.analysis.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; analysis runs will fail until configured");
    }
    let analyzer = AnalysisService::new(functions.clone(), config.analysis.clone());

    let app_state = AppState {
        projects: ProjectStorage::new(pool.clone()),
        functions,
        plugins: PluginStorage::new(pool.clone()),
        dashboard: DashboardStorage::new(pool),
        analyzer,
    };

    tracing::info!("📡 Creating HTTP router with all endpoints");
    let app = Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // Project CRUD and function listings
        .merge(create_project_routes())
        // Analysis trigger
        .merge(create_analysis_routes())
        // Plugin generation, download, preview, listing
        .merge(create_plugin_routes())
        // Stats and activity aggregates
        .merge(create_dashboard_routes())
        .with_state(app_state);

    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Start the HTTP server with the given configuration
///
/// Creates the application and starts the Axum server on the configured
/// address and port.
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting codeinsight server...");

    let app = create_app(config.clone()).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
