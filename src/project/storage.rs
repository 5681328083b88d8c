/// SQLite persistence layer for projects
///
/// Plain SQL with bound parameters over the shared pool. Enum columns are
/// stored as lowercase text and decoded through the type's from_str.

use crate::project::types::{NewProject, Project, ProjectStatus, ProjectType};
use anyhow::Result;
use sqlx::{sqlite::SqlitePool, Row};

/// SQLite-backed project storage
#[derive(Debug, Clone)]
pub struct ProjectStorage {
    pool: SqlitePool,
}

impl ProjectStorage {
    /// Create new storage instance with database connection
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new project in `pending` status and return the stored row
    pub async fn create_project(&self, data: &NewProject) -> Result<Project> {
        let row = sqlx::query(
            r#"
            INSERT INTO projects (name, description, url, project_type, status)
            VALUES (?, ?, ?, ?, 'pending')
            RETURNING id, name, description, url, project_type, status, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.url)
        .bind(data.project_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_project(&row)
    }

    /// Retrieve a project by id
    pub async fn get_project(&self, id: i64) -> Result<Option<Project>> {
        let row = sqlx::query(
            "SELECT id, name, description, url, project_type, status, created_at, updated_at \
             FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_project(&row)?)),
            None => Ok(None),
        }
    }

    /// List all projects, newest first
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let rows = sqlx::query(
            "SELECT id, name, description, url, project_type, status, created_at, updated_at \
             FROM projects ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_project).collect()
    }

    /// Update a project's analysis status and bump its updated_at timestamp
    pub async fn update_status(&self, id: i64, status: ProjectStatus) -> Result<()> {
        sqlx::query(
            "UPDATE projects SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_project(row: &sqlx::sqlite::SqliteRow) -> Result<Project> {
        let type_str: String = row.get("project_type");
        let status_str: String = row.get("status");

        Ok(Project {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            url: row.get("url"),
            project_type: ProjectType::from_str(&type_str)
                .ok_or_else(|| anyhow::anyhow!("Unknown project type in database: {}", type_str))?,
            status: ProjectStatus::from_str(&status_str)
                .ok_or_else(|| anyhow::anyhow!("Unknown project status in database: {}", status_str))?,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn sample_project() -> NewProject {
        NewProject {
            name: "Acme Storefront".to_string(),
            description: Some("Marketing site".to_string()),
            url: Some("https://acme.example".to_string()),
            project_type: ProjectType::Website,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_project() {
        let pool = db::connect_in_memory().await.unwrap();
        let storage = ProjectStorage::new(pool);

        let created = storage.create_project(&sample_project()).await.unwrap();
        assert_eq!(created.name, "Acme Storefront");
        assert_eq!(created.status, ProjectStatus::Pending);

        let fetched = storage.get_project(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.project_type, ProjectType::Website);
    }

    #[tokio::test]
    async fn test_get_missing_project() {
        let pool = db::connect_in_memory().await.unwrap();
        let storage = ProjectStorage::new(pool);
        assert!(storage.get_project(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_status_transition() {
        let pool = db::connect_in_memory().await.unwrap();
        let storage = ProjectStorage::new(pool);

        let created = storage.create_project(&sample_project()).await.unwrap();
        storage.update_status(created.id, ProjectStatus::Analyzing).await.unwrap();
        storage.update_status(created.id, ProjectStatus::Completed).await.unwrap();

        let fetched = storage.get_project(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ProjectStatus::Completed);
    }

    #[tokio::test]
    async fn test_list_projects() {
        let pool = db::connect_in_memory().await.unwrap();
        let storage = ProjectStorage::new(pool);

        storage.create_project(&sample_project()).await.unwrap();
        let mut second = sample_project();
        second.name = "Internal Tools".to_string();
        second.project_type = ProjectType::Codebase;
        storage.create_project(&second).await.unwrap();

        let projects = storage.list_projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        // Newest first
        assert_eq!(projects[0].name, "Internal Tools");
    }
}
