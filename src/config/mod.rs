//! Configuration management for the buildpack

pub mod env;
pub mod schema;

pub use env::{BuildEnv, Tooling};
pub use schema::Config;

use crate::error::{BuildpackError, BuildpackResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Name of the buildpack configuration file
pub const CONFIG_FILE: &str = "buildpack.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the buildpack root directory
    ///
    /// The binary ships as `<root>/bin/dotnet-buildpack`.
    pub fn default_root() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent()?.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_root().join(CONFIG_FILE)
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> BuildpackResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> BuildpackResult<Config> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            BuildpackError::io(format!("reading config from {}", path.display()), e)
        })?;

        toml::from_str(crate::text::strip_bom(&content)).map_err(|e| {
            BuildpackError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })
    }

    /// Directory relative config paths resolve against
    pub fn root(&self) -> PathBuf {
        match self.config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
