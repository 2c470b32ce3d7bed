//! CLI command implementations

pub mod compile;
pub mod project;
pub mod sdk_version;

pub use compile::execute as compile;
pub use project::execute as project;
pub use sdk_version::execute as sdk_version;

use crate::config::{BuildEnv, Config};
use crate::error::{BuildpackError, BuildpackResult};
use crate::sdk::SdkManifest;
use std::path::{Path, PathBuf};

/// Loaded configuration shared by every command
#[derive(Debug, Clone)]
pub struct Buildpack {
    /// Parsed `buildpack.toml`
    pub config: Config,

    /// Directory relative config paths resolve against
    pub root: PathBuf,

    /// Staging environment settings
    pub env: BuildEnv,
}

impl Buildpack {
    pub fn new(config: Config, root: impl Into<PathBuf>, env: BuildEnv) -> Self {
        Self {
            config,
            root: root.into(),
            env,
        }
    }

    /// Load the SDK manifest and tooling mapping
    pub fn manifest(&self) -> BuildpackResult<SdkManifest> {
        let buildpack = &self.config.buildpack;
        SdkManifest::load(
            &buildpack.manifest_path(&self.root),
            &buildpack.sdk_tools_path(&self.root),
        )
    }
}

/// Fail unless `dir` is an existing directory
pub(crate) fn require_dir(dir: &Path) -> BuildpackResult<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(BuildpackError::PathNotFound(dir.to_path_buf()))
    }
}
