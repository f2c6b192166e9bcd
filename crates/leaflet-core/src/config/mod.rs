//! Application configuration schemas.
//!
//! Deserialized from TOML files via the `config` crate, overlaid with
//! `LEAFLET__*` environment variables. Every field carries a default, so
//! an empty source set still yields a usable configuration.

pub mod logging;
pub mod plugin;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::plugin::PluginConfig;

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plugin identity.
    #[serde(default)]
    pub plugin: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default` with an environment-specific overlay and
    /// environment variables prefixed with `LEAFLET`.
    pub fn load(env: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(environment())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build config: {e}"),
                    e,
                )
            })?;

        Ok(config.try_deserialize()?)
    }

    /// Load configuration from a single explicit file, still overlaid with
    /// environment variables. The file must exist.
    pub fn load_from(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let config = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(environment())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build config from '{}': {e}", path.display()),
                    e,
                )
            })?;

        Ok(config.try_deserialize()?)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("LEAFLET")
        .separator("__")
        .try_parsing(true)
}
