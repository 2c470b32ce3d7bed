//! Configuration schema for the buildpack
//!
//! Configuration is stored at `<buildpack root>/buildpack.toml`. Every key
//! is optional; relative paths resolve against the buildpack root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Buildpack-wide settings
    pub buildpack: BuildpackConfig,

    /// Per-installer overrides
    pub installers: InstallersConfig,
}

/// Buildpack-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildpackConfig {
    /// Version shown in the compile banner
    pub version: String,

    /// Dependency manifest listing SDK and tool versions
    pub manifest: PathBuf,

    /// Mapping of SDK versions to tooling families
    pub sdk_tools: PathBuf,

    /// Command that fetches a named dependency archive into a directory
    pub download_command: PathBuf,

    /// Scratch directory for downloaded archives
    pub download_dir: PathBuf,
}

impl Default for BuildpackConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            manifest: PathBuf::from("manifest.yml"),
            sdk_tools: PathBuf::from("dotnet-sdk-tools.yml"),
            download_command: PathBuf::from("compile-extensions/bin/download_dependency"),
            download_dir: PathBuf::from("/tmp"),
        }
    }
}

impl BuildpackConfig {
    /// Manifest path resolved against the buildpack root
    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.manifest)
    }

    /// Tooling mapping path resolved against the buildpack root
    pub fn sdk_tools_path(&self, root: &Path) -> PathBuf {
        root.join(&self.sdk_tools)
    }

    /// Download command resolved against the buildpack root
    pub fn download_command_path(&self, root: &Path) -> PathBuf {
        root.join(&self.download_command)
    }
}

/// Overrides for the archive-based installers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallersConfig {
    /// libunwind native library
    pub libunwind: ArchiveConfig,

    /// Node.js runtime
    pub node: ArchiveConfig,

    /// Bower package manager
    pub bower: ArchiveConfig,
}

/// Overrides for one archive installer
///
/// Unset fields keep the installer's built-in value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Whether the installer runs at all
    pub enabled: bool,

    /// Manifest dependency name
    pub dependency: Option<String>,

    /// Pinned version (defaults to the manifest default)
    pub version: Option<String>,

    /// Archive file name, `{version}` is substituted
    pub archive: Option<String>,

    /// Unpack directory relative to the build dir
    pub target_dir: Option<String>,

    /// Whether `target_dir` is persisted in the buildpack cache
    pub cacheable: Option<bool>,

    /// Leading path components dropped on extract
    pub strip_components: Option<u32>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dependency: None,
            version: None,
            archive: None,
            target_dir: None,
            cacheable: None,
            strip_components: None,
        }
    }
}
