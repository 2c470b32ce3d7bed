//! Installers that unpack a single manifest archive
//!
//! libunwind, Node.js and Bower differ only in which archive they fetch
//! and where it is unpacked, so one installer type covers all three.

use super::{marker, InstallContext};
use crate::config::schema::ArchiveConfig;
use crate::error::BuildpackResult;
use crate::ui::Reporter;
use std::path::PathBuf;
use tracing::debug;

/// Unpack directory of libunwind, also put on `LD_LIBRARY_PATH`
pub const LIBUNWIND_DIR: &str = "libunwind";

/// What to fetch and where to put it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSpec {
    /// Display name
    pub name: String,

    /// Manifest dependency name
    pub dependency: String,

    /// Pinned version; the manifest default when unset
    pub version: Option<String>,

    /// Archive file name template, `{version}` is substituted
    pub archive: String,

    /// Unpack directory relative to the build dir
    pub target_dir: String,

    /// Whether `target_dir` is persisted in the buildpack cache
    pub cacheable: bool,

    /// Leading path components dropped on extract
    pub strip_components: u32,
}

impl ArchiveSpec {
    /// Native unwind library required by the .NET runtime
    pub fn libunwind() -> Self {
        Self {
            name: "libunwind".to_string(),
            dependency: "libunwind".to_string(),
            version: None,
            archive: "libunwind-{version}.tar.gz".to_string(),
            target_dir: LIBUNWIND_DIR.to_string(),
            cacheable: true,
            strip_components: 0,
        }
    }

    /// Node.js runtime used by front-end build scripts
    pub fn node() -> Self {
        Self {
            name: "Node.js".to_string(),
            dependency: "node".to_string(),
            version: None,
            archive: "node-v{version}-linux-x64.tar.gz".to_string(),
            target_dir: ".node".to_string(),
            cacheable: true,
            strip_components: 1,
        }
    }

    /// Bower package manager
    pub fn bower() -> Self {
        Self {
            name: "Bower".to_string(),
            dependency: "bower".to_string(),
            version: None,
            archive: "bower-{version}.tgz".to_string(),
            target_dir: ".bower".to_string(),
            cacheable: true,
            strip_components: 1,
        }
    }

    /// Apply configured overrides
    pub fn with_overrides(mut self, config: &ArchiveConfig) -> Self {
        if let Some(ref dependency) = config.dependency {
            self.dependency = dependency.clone();
        }
        if let Some(ref version) = config.version {
            self.version = Some(version.clone());
        }
        if let Some(ref archive) = config.archive {
            self.archive = archive.clone();
        }
        if let Some(ref target_dir) = config.target_dir {
            self.target_dir = target_dir.clone();
        }
        if let Some(cacheable) = config.cacheable {
            self.cacheable = cacheable;
        }
        if let Some(strip) = config.strip_components {
            self.strip_components = strip;
        }
        self
    }

    /// Archive file name for a version
    pub fn archive_name(&self, version: &str) -> String {
        self.archive.replace("{version}", version)
    }
}

/// Installs one archive into the build dir
#[derive(Clone)]
pub struct ArchiveInstaller {
    spec: ArchiveSpec,
    ctx: InstallContext,
}

impl ArchiveInstaller {
    /// Create an installer for `spec`
    pub fn new(spec: ArchiveSpec, ctx: InstallContext) -> Self {
        Self { spec, ctx }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Cache subdirectory, if the install is cacheable
    pub fn cache_dir(&self) -> Option<&str> {
        self.spec.cacheable.then_some(self.spec.target_dir.as_str())
    }

    /// Version to install
    pub fn version(&self) -> BuildpackResult<String> {
        match self.spec.version {
            Some(ref version) => Ok(version.clone()),
            None => self.ctx.manifest.version_for(&self.spec.dependency),
        }
    }

    fn build_target(&self) -> PathBuf {
        self.ctx.build_dir.join(&self.spec.target_dir)
    }

    /// Whether the wanted version is missing from the build dir and cache
    pub fn should_install(&self) -> BuildpackResult<bool> {
        let version = self.version()?;
        if marker::contains_version(&self.build_target(), &version)? {
            debug!("{} {} already in build dir", self.spec.name, version);
            return Ok(false);
        }
        if let Some(dir) = self.cache_dir() {
            if marker::contains_version(&self.ctx.cache_dir.join(dir), &version)? {
                debug!("{} {} already cached", self.spec.name, version);
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Fetch and unpack the archive, then record its version
    pub async fn install(&self, reporter: &dyn Reporter) -> BuildpackResult<()> {
        let version = self.version()?;
        let target = self.build_target();

        reporter.info(&format!("{} version: {}", self.spec.name, version));
        self.ctx
            .fetcher
            .fetch_and_extract(
                &self.spec.archive_name(&version),
                &target,
                self.spec.strip_components,
                reporter,
            )
            .await?;
        marker::record_version(&target, &version)
    }
}
