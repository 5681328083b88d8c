/// Plugin generator facade
///
/// Chooses the basic or advanced rendering path. The distinction is whether
/// the caller requested features at all: an omitted feature list means basic,
/// a present list — even an empty one — routes to the advanced template so
/// the script carries the `features` array and the 1.1.0 shape.

use crate::analysis::types::FunctionRecord;
use crate::plugin::templates::{self, ADVANCED_VERSION, BASIC_VERSION};
use crate::plugin::types::GeneratedPlugin;
use crate::project::types::Project;
use chrono::{DateTime, Utc};

/// Facade over the template renderers
pub struct PluginGenerator;

impl PluginGenerator {
    /// Render plugin source text for a project and its function records
    ///
    /// Pure string composition with no failure states: renderer output is
    /// returned together with the template version it embedded, which is the
    /// version the caller must persist.
    pub fn generate(
        project: &Project,
        functions: &[FunctionRecord],
        config_name: &str,
        features: Option<&[String]>,
        generated_at: DateTime<Utc>,
    ) -> GeneratedPlugin {
        match features {
            Some(features) => GeneratedPlugin {
                code: templates::render_advanced(project, functions, config_name, features, generated_at),
                version: ADVANCED_VERSION.to_string(),
            },
            None => GeneratedPlugin {
                code: templates::render_basic(project, functions, config_name, generated_at),
                version: BASIC_VERSION.to_string(),
            },
        }
    }
}
