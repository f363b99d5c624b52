//! JSON configuration.
//!
//! ```json
//! {
//!   "enabled_modules": { "teleport": true },
//!   "modules": {
//!     "teleport": { "anchor_placed_sound": "block.respawn_anchor.set_spawn" }
//!   }
//! }
//! ```
//!
//! Modules missing from `enabled_modules` are enabled. Modules missing from
//! `modules` get their default settings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweaksConfig {
    /// Per-module on/off switches, keyed by module name
    pub enabled_modules: BTreeMap<String, bool>,
    /// Raw per-module settings sections, keyed by module name
    pub modules: BTreeMap<String, serde_json::Value>,
}

impl TweaksConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration, writing the defaults out first if the file does
    /// not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            info!(
                "Configuration file {} not found, wrote defaults",
                path.display()
            );
            return Ok(config);
        }

        Self::load(path)
    }

    /// Write configuration as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        let text = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(path, text).map_err(io_error)
    }

    /// Whether a module is switched on.
    pub fn is_enabled(&self, module: &str) -> bool {
        self.enabled_modules.get(module).copied().unwrap_or(true)
    }

    /// Deserialize a module's settings section, or its defaults if absent.
    pub fn settings<T>(&self, module: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        match self.modules.get(module) {
            Some(section) => {
                T::deserialize(section).map_err(|source| ConfigError::Settings {
                    module: module.to_owned(),
                    source,
                })
            }
            None => Ok(T::default()),
        }
    }

    /// Switch a module on or off.
    #[must_use]
    pub fn with_enabled(mut self, module: impl Into<String>, enabled: bool) -> Self {
        self.enabled_modules.insert(module.into(), enabled);
        self
    }

    /// Replace a module's settings section.
    #[must_use]
    pub fn with_settings(mut self, module: impl Into<String>, settings: serde_json::Value) -> Self {
        self.modules.insert(module.into(), settings);
        self
    }
}
