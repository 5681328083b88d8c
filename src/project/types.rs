/// Core project type definitions
///
/// A project points at a website URL or an external codebase and carries the
/// status of its most recent analysis run. Status is mutated only by the
/// analysis workflow; everything else is immutable after creation.

use serde::{Deserialize, Serialize};

/// A unit of analysis tracked through the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Row id assigned by the database
    pub id: i64,
    /// Human-readable project name (embedded verbatim in generated plugins)
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Source URL for website projects
    pub url: Option<String>,
    /// Whether this is a live website or an external codebase
    pub project_type: ProjectType,
    /// Analysis lifecycle status
    pub status: ProjectStatus,
    /// Creation timestamp (database-local)
    pub created_at: String,
    /// Last status change timestamp
    pub updated_at: String,
}

/// Request payload for creating a project
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub project_type: ProjectType,
}

/// Kind of source a project analyzes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Live webpage; analysis fetches and inspects its inline scripts
    Website,
    /// External code repository (source fetch is currently a stub)
    Codebase,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Website => "website",
            ProjectType::Codebase => "codebase",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "website" => Some(ProjectType::Website),
            "codebase" => Some(ProjectType::Codebase),
            _ => None,
        }
    }
}

/// Analysis lifecycle status
///
/// Transitions: Pending → Analyzing → (Completed | Failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Pending,
    Analyzing,
    Completed,
    Failed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::Analyzing => "analyzing",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ProjectStatus::Pending),
            "analyzing" => Some(ProjectStatus::Analyzing),
            "completed" => Some(ProjectStatus::Completed),
            "failed" => Some(ProjectStatus::Failed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_roundtrip() {
        for t in [ProjectType::Website, ProjectType::Codebase] {
            assert_eq!(ProjectType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(ProjectType::from_str("desktop"), None);
    }

    #[test]
    fn test_project_status_roundtrip() {
        for s in [
            ProjectStatus::Pending,
            ProjectStatus::Analyzing,
            ProjectStatus::Completed,
            ProjectStatus::Failed,
        ] {
            assert_eq!(ProjectStatus::from_str(s.as_str()), Some(s));
        }
        assert_eq!(ProjectStatus::from_str(""), None);
    }

    #[test]
    fn test_project_type_serde_lowercase() {
        let t: ProjectType = serde_json::from_str("\"website\"").unwrap();
        assert_eq!(t, ProjectType::Website);
        assert_eq!(serde_json::to_string(&ProjectStatus::Failed).unwrap(), "\"failed\"");
    }
}
