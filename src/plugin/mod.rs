/// Plugin generation layer
///
/// Renders self-executing browser scripts from analysis data and persists
/// them as versioned, downloadable plugin configs. Rendering is pure string
/// composition: fragment builders selected by feature flags, concatenated in
/// a fixed order.

pub mod generator;
pub mod storage;
pub mod templates;
pub mod types;

pub use generator::PluginGenerator;
pub use storage::PluginStorage;
pub use types::{GeneratedPlugin, NewPluginConfig, PluginConfig, PluginListing};
