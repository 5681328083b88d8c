/// codeinsight: dashboard backend for AI-assisted code analysis and
/// browser insight plugin generation
///
/// Projects (websites or codebases) are analyzed through a hosted LLM into
/// per-function metadata, which the plugin layer renders into downloadable,
/// self-executing browser scripts.

// Core configuration and setup
pub mod config;

// SQLite pool setup and schema
pub mod db;

// Project management layer - entities and persistence
pub mod project;

// AI analysis layer - content fetch, LLM call, function map persistence
pub mod analysis;

// Plugin layer - template rendering, generator facade, config persistence
pub mod plugin;

// Dashboard aggregates - stats and activity feed
pub mod dashboard;

// HTTP API layer - REST endpoints for the dashboard
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use analysis::{AnalysisOutcome, AnalysisService, FunctionRecord};
pub use plugin::{GeneratedPlugin, PluginConfig, PluginGenerator};
pub use project::{Project, ProjectStatus, ProjectType};
pub use server::start_server;
