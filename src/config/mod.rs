/// Configuration management for the codeinsight server
///
/// Handles server binding, database location, and AI analysis settings.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// AI analysis configuration
    pub analysis: AnalysisConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Database configuration for the SQLite store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (default: "data/codeinsight.db")
    pub path: String,
}

/// Settings for the hosted LLM used by project analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// API key for the Gemini endpoint; analysis fails gracefully when unset
    pub api_key: Option<String>,
    /// Model identifier (default: "gemini-1.5-flash")
    pub model: String,
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("CODEINSIGHT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("CODEINSIGHT_PORT")
                    .unwrap_or_else(|_| "3006".to_string())
                    .parse()
                    .unwrap_or(3006),
            },
            database: DatabaseConfig {
                path: std::env::var("CODEINSIGHT_DB")
                    .unwrap_or_else(|_| "data/codeinsight.db".to_string()),
            },
            analysis: AnalysisConfig {
                api_key: std::env::var("GEMINI_API_KEY").ok(),
                model: std::env::var("CODEINSIGHT_AI_MODEL")
                    .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            },
        }
    }
}
