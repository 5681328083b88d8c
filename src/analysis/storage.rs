/// SQLite persistence layer for function maps
///
/// `parameters` and `ai_analysis` are serialized JSON columns; everything
/// else is indexed scalar data. Rows are insert-only.

use crate::analysis::types::{AiAnalysis, FunctionRecord, NewFunctionMap};
use anyhow::Result;
use sqlx::{sqlite::SqlitePool, Row};
use std::collections::BTreeMap;

/// SQLite-backed function map storage
#[derive(Debug, Clone)]
pub struct FunctionMapStorage {
    pool: SqlitePool,
}

impl FunctionMapStorage {
    /// Create new storage instance with database connection
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert one function map row and return the stored record
    pub async fn create_function_map(&self, data: &NewFunctionMap) -> Result<FunctionRecord> {
        let parameters_json = serde_json::to_string(&data.parameters)?;
        let ai_analysis_json = match &data.ai_analysis {
            Some(analysis) => Some(serde_json::to_string(analysis)?),
            None => None,
        };

        let row = sqlx::query(
            r#"
            INSERT INTO function_maps (
                project_id, function_name, description, parameters, return_type,
                file_path, line_number, complexity_score, ai_analysis
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, project_id, function_name, description, parameters, return_type,
                      file_path, line_number, complexity_score, ai_analysis, created_at
            "#,
        )
        .bind(data.project_id)
        .bind(&data.function_name)
        .bind(&data.description)
        .bind(&parameters_json)
        .bind(&data.return_type)
        .bind(&data.file_path)
        .bind(data.line_number)
        .bind(data.complexity_score)
        .bind(&ai_analysis_json)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_record(&row)
    }

    /// List all function maps for a project, ordered by function name
    pub async fn list_by_project(&self, project_id: i64) -> Result<Vec<FunctionRecord>> {
        let rows = sqlx::query(
            "SELECT id, project_id, function_name, description, parameters, return_type, \
                    file_path, line_number, complexity_score, ai_analysis, created_at \
             FROM function_maps WHERE project_id = ? ORDER BY function_name, id",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<FunctionRecord> {
        let parameters_json: Option<String> = row.get("parameters");
        let parameters: BTreeMap<String, String> = match parameters_json {
            Some(json) => serde_json::from_str(&json)?,
            None => BTreeMap::new(),
        };

        let ai_analysis_json: Option<String> = row.get("ai_analysis");
        let ai_analysis: Option<AiAnalysis> = match ai_analysis_json {
            Some(json) => Some(serde_json::from_str(&json)?),
            None => None,
        };

        Ok(FunctionRecord {
            id: row.get("id"),
            project_id: row.get("project_id"),
            function_name: row.get("function_name"),
            description: row.get("description"),
            parameters,
            return_type: row.get("return_type"),
            file_path: row.get("file_path"),
            line_number: row.get("line_number"),
            complexity_score: row.get("complexity_score"),
            ai_analysis,
            created_at: row.get("created_at"),
        })
    }
}
