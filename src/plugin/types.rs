/// Plugin config types and filename handling
///
/// A PluginConfig is one generated, versioned script artifact tied to a
/// project. `plugin_code` is derived text: deterministic given the project,
/// its function maps, the config name, the feature set, and the generation
/// timestamp. The generated header embeds the same config name and version
/// that `file_name` produces, so the download filename and the script's own
/// usage instructions always agree.

use serde::{Deserialize, Serialize};

/// A generated, downloadable plugin script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Row id assigned by the database
    pub id: i64,
    /// Owning project
    pub project_id: i64,
    /// Name chosen by the caller at generation time
    pub config_name: String,
    /// The rendered script text
    pub plugin_code: String,
    /// Template version embedded in the script ("1.0.0" basic, "1.1.0" advanced)
    pub version: String,
    /// Whether this config counts toward "plugins generated" statistics
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl PluginConfig {
    /// Download filename for this plugin: `<sanitized name>_v<version>.js`
    pub fn file_name(&self) -> String {
        plugin_file_name(&self.config_name, &self.version)
    }
}

/// Data for inserting a new plugin config row
#[derive(Debug, Clone)]
pub struct NewPluginConfig {
    pub project_id: i64,
    pub config_name: String,
    pub plugin_code: String,
    pub version: String,
    pub is_active: bool,
}

/// Plugin config joined with its owning project's name, for list views
#[derive(Debug, Clone, Serialize)]
pub struct PluginListing {
    pub id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub config_name: String,
    pub version: String,
    pub is_active: bool,
    pub created_at: String,
}

/// Output of the plugin generator facade
#[derive(Debug, Clone)]
pub struct GeneratedPlugin {
    /// Rendered script text
    pub code: String,
    /// Template version the renderer embedded
    pub version: String,
}

/// Build the download filename from a config name and version
///
/// Every non-alphanumeric character of the name is replaced 1:1 with `_`,
/// matching the filename embedded in the generated script header.
pub fn plugin_file_name(config_name: &str, version: &str) -> String {
    let sanitized: String = config_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_v{}.js", sanitized, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_sanitization() {
        assert_eq!(plugin_file_name("My Plugin!", "1.0.0"), "My_Plugin__v1.0.0.js");
        assert_eq!(plugin_file_name("tracker", "1.1.0"), "tracker_v1.1.0.js");
        assert_eq!(plugin_file_name("Ünïcode", "1.0.0"), "_n_code_v1.0.0.js");
    }

    #[test]
    fn test_config_file_name_uses_own_fields() {
        let config = PluginConfig {
            id: 1,
            project_id: 1,
            config_name: "My Plugin!".to_string(),
            plugin_code: String::new(),
            version: "1.0.0".to_string(),
            is_active: true,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert_eq!(config.file_name(), "My_Plugin__v1.0.0.js");
    }
}
