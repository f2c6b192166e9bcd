//! Plugin identity configuration.

use serde::{Deserialize, Serialize};

/// Identity of the plugin being bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugin slug, used as the logging span name during bootstrap.
    #[serde(default = "default_name")]
    pub name: String,
    /// Plugin version string.
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
        }
    }
}

fn default_name() -> String {
    "leaflet-layers".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
