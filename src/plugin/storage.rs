/// SQLite persistence layer for plugin configs
///
/// Generated scripts are stored whole in the plugin_code column. The list
/// view joins the owning project's name for the dashboard.

use crate::plugin::types::{NewPluginConfig, PluginConfig, PluginListing};
use anyhow::Result;
use sqlx::{sqlite::SqlitePool, Row};

/// SQLite-backed plugin config storage
#[derive(Debug, Clone)]
pub struct PluginStorage {
    pool: SqlitePool,
}

impl PluginStorage {
    /// Create new storage instance with database connection
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new plugin config and return the stored row
    pub async fn create_plugin_config(&self, data: &NewPluginConfig) -> Result<PluginConfig> {
        let row = sqlx::query(
            r#"
            INSERT INTO plugin_configs (project_id, config_name, plugin_code, version, is_active)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, project_id, config_name, plugin_code, version, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(data.project_id)
        .bind(&data.config_name)
        .bind(&data.plugin_code)
        .bind(&data.version)
        .bind(data.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::row_to_config(&row))
    }

    /// Retrieve a plugin config by id
    pub async fn get_plugin_config(&self, id: i64) -> Result<Option<PluginConfig>> {
        let row = sqlx::query(
            "SELECT id, project_id, config_name, plugin_code, version, is_active, \
                    created_at, updated_at \
             FROM plugin_configs WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Self::row_to_config(&row)))
    }

    /// List all plugin configs joined with project names, newest first
    pub async fn list_plugin_configs(&self) -> Result<Vec<PluginListing>> {
        let rows = sqlx::query(
            "SELECT pc.id, pc.project_id, p.name AS project_name, pc.config_name, \
                    pc.version, pc.is_active, pc.created_at \
             FROM plugin_configs pc \
             JOIN projects p ON pc.project_id = p.id \
             ORDER BY pc.created_at DESC, pc.id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| PluginListing {
                id: row.get("id"),
                project_id: row.get("project_id"),
                project_name: row.get("project_name"),
                config_name: row.get("config_name"),
                version: row.get("version"),
                is_active: row.get("is_active"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    /// List active plugin configs for one project, newest first
    pub async fn list_active_by_project(&self, project_id: i64) -> Result<Vec<PluginConfig>> {
        let rows = sqlx::query(
            "SELECT id, project_id, config_name, plugin_code, version, is_active, \
                    created_at, updated_at \
             FROM plugin_configs \
             WHERE project_id = ? AND is_active = TRUE \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| Self::row_to_config(row)).collect())
    }

    /// Flip a plugin config's active flag and bump its updated_at timestamp
    pub async fn set_active(&self, id: i64, is_active: bool) -> Result<()> {
        sqlx::query(
            "UPDATE plugin_configs SET is_active = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(is_active)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a plugin config by id
    pub async fn delete_plugin_config(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM plugin_configs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_config(row: &sqlx::sqlite::SqliteRow) -> PluginConfig {
        PluginConfig {
            id: row.get("id"),
            project_id: row.get("project_id"),
            config_name: row.get("config_name"),
            plugin_code: row.get("plugin_code"),
            version: row.get("version"),
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}
