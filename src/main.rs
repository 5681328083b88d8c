/// codeinsight: AI code analysis dashboard backend
///
/// Main entry point. Initializes configuration and starts the HTTP server
/// with project management, analysis, and plugin generation endpoints.

use codeinsight::{config::Config, server::start_server};

/// Application entry point
///
/// The server provides:
/// - Project management API at /api/projects*
/// - Analysis trigger at /api/analyze
/// - Plugin generation and delivery at /api/plugin*, /api/plugins
/// - Dashboard aggregates at /api/stats and /api/activity
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (defaults to 0.0.0.0:3006 and a local SQLite file)
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
