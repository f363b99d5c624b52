use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode configuration for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid settings for module '{module}': {source}")]
    Settings {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur during module operations
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("Module '{module}' requires the {capability} capability, which the host lacks")]
    MissingCapability {
        module: &'static str,
        capability: &'static str,
    },

    #[error("Module not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
