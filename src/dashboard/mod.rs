/// Dashboard aggregates: headline statistics and the recent activity feed
///
/// Both are derived entirely from stored rows; nothing here writes.

use anyhow::Result;
use serde::Serialize;
use sqlx::{sqlite::SqlitePool, Row};

/// Headline counters for the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_projects: i64,
    pub completed_analyses: i64,
    pub functions_analyzed: i64,
    /// Active plugin configs only
    pub plugins_generated: i64,
}

/// One event in the recent activity feed
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEvent {
    /// Synthetic id: "project_{id}" or "plugin_{id}"
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub project_name: String,
    pub timestamp: String,
    pub details: Option<String>,
}

/// Read-only aggregate queries over the shared pool
#[derive(Debug, Clone)]
pub struct DashboardStorage {
    pool: SqlitePool,
}

impl DashboardStorage {
    /// Create new storage instance with database connection
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Compute the dashboard counters
    pub async fn project_stats(&self) -> Result<ProjectStats> {
        let project_row = sqlx::query(
            "SELECT COUNT(*) AS total_projects, \
                    COUNT(CASE WHEN status = 'completed' THEN 1 END) AS completed_analyses \
             FROM projects",
        )
        .fetch_one(&self.pool)
        .await?;

        let function_row = sqlx::query("SELECT COUNT(*) AS functions_analyzed FROM function_maps")
            .fetch_one(&self.pool)
            .await?;

        let plugin_row = sqlx::query(
            "SELECT COUNT(*) AS plugins_generated FROM plugin_configs WHERE is_active = TRUE",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(ProjectStats {
            total_projects: project_row.get("total_projects"),
            completed_analyses: project_row.get("completed_analyses"),
            functions_analyzed: function_row.get("functions_analyzed"),
            plugins_generated: plugin_row.get("plugins_generated"),
        })
    }

    /// Recent event feed: project status changes and plugin generations from
    /// the last 7 days, newest first
    pub async fn recent_activity(&self, limit: i64) -> Result<Vec<ActivityEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT
                'project_' || p.id AS id,
                CASE
                    WHEN p.status = 'completed' THEN 'analysis_completed'
                    WHEN p.status = 'analyzing' THEN 'analysis_started'
                    WHEN p.status = 'failed' THEN 'analysis_failed'
                    ELSE 'project_created'
                END AS kind,
                p.name AS project_name,
                p.updated_at AS timestamp,
                CASE
                    WHEN p.status = 'completed' THEN
                        (SELECT 'Found ' || COUNT(*) || ' functions'
                         FROM function_maps WHERE project_id = p.id)
                    ELSE NULL
                END AS details
            FROM projects p
            WHERE p.updated_at >= datetime('now', '-7 days')

            UNION ALL

            SELECT
                'plugin_' || pc.id AS id,
                'plugin_generated' AS kind,
                p.name AS project_name,
                pc.created_at AS timestamp,
                pc.config_name || ' v' || pc.version AS details
            FROM plugin_configs pc
            JOIN projects p ON pc.project_id = p.id
            WHERE pc.created_at >= datetime('now', '-7 days')

            ORDER BY timestamp DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| ActivityEvent {
                id: row.get("id"),
                kind: row.get("kind"),
                project_name: row.get("project_name"),
                timestamp: row.get("timestamp"),
                details: row.get("details"),
            })
            .collect())
    }
}
