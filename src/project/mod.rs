/// Project management layer
///
/// Projects are the unit of analysis: a website or codebase tracked through a
/// pending → analyzing → (completed | failed) status lifecycle.

pub mod storage;
pub mod types;

pub use storage::ProjectStorage;
pub use types::{NewProject, Project, ProjectStatus, ProjectType};
