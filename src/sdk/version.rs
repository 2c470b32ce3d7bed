//! .NET SDK version resolution
//!
//! Resolution tiers, first match wins:
//!
//! 1. `global.json` at the app root pins `sdk.version`.
//! 2. Both `project.json` and `*.csproj` exist: `DOTNET_SDK_TOOLING`
//!    decides, and without it the app cannot be built.
//! 3. Only `*.csproj`: latest msbuild SDK from the manifest.
//! 4. Only `project.json`, or neither: the manifest default SDK.

use super::manifest::SdkManifest;
use crate::config::{BuildEnv, Tooling};
use crate::error::{BuildpackError, BuildpackResult};
use crate::project::ProjectLayout;
use crate::text::read_text;
use crate::ui::Reporter;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// SDK pin file at the app root
pub const GLOBAL_JSON: &str = "global.json";

/// Warning shown whenever an app is built with project.json tooling
pub const PROJECT_JSON_DEPRECATION: &str = "Support for project.json in the .NET Core buildpack will\n\
be deprecated. For more information see:\n\
https://blogs.msdn.microsoft.com/dotnet/2016/11/16/announcing-net-core-tools-msbuild-alpha";

/// Why a version was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// Pinned in `global.json`
    GlobalJson,
    /// Picked by `DOTNET_SDK_TOOLING` for a mixed app
    ToolingOverride(Tooling),
    /// Latest msbuild SDK for a `*.csproj` app
    LatestMsbuild,
    /// Manifest default
    Default,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalJson => write!(f, "pinned in {}", GLOBAL_JSON),
            Self::ToolingOverride(tooling) => {
                write!(f, "selected by {}={}", crate::config::env::TOOLING_VAR, tooling)
            }
            Self::LatestMsbuild => write!(f, "latest SDK with msbuild"),
            Self::Default => write!(f, "buildpack default"),
        }
    }
}

/// A resolved SDK version and its rationale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    /// SDK version string
    pub version: String,

    /// Why it was chosen
    pub source: VersionSource,
}

impl ResolvedVersion {
    fn new(version: impl Into<String>, source: VersionSource) -> Self {
        Self {
            version: version.into(),
            source,
        }
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.source)
    }
}

/// Picks the SDK version for an app
pub struct SdkVersionResolver<'a> {
    app_root: &'a Path,
    manifest: &'a SdkManifest,
    env: &'a BuildEnv,
}

impl<'a> SdkVersionResolver<'a> {
    /// Create a resolver for the app at `app_root`
    pub fn new(app_root: &'a Path, manifest: &'a SdkManifest, env: &'a BuildEnv) -> Self {
        Self {
            app_root,
            manifest,
            env,
        }
    }

    /// Resolve the SDK version for a scanned layout
    pub fn resolve(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<ResolvedVersion> {
        if let Some(version) = self.global_json_version(reporter)? {
            debug!("SDK version {} pinned by {}", version, GLOBAL_JSON);
            return Ok(ResolvedVersion::new(version, VersionSource::GlobalJson));
        }

        match (layout.has_project_json(), layout.has_csproj()) {
            (true, true) => self.resolve_conflict(layout, reporter),
            (false, true) => Ok(ResolvedVersion::new(
                self.manifest.latest_sdk_version(Tooling::Msbuild)?,
                VersionSource::LatestMsbuild,
            )),
            _ => {
                let version = self.manifest.default_sdk_version()?;
                reporter.warn(PROJECT_JSON_DEPRECATION);
                Ok(ResolvedVersion::new(version, VersionSource::Default))
            }
        }
    }

    fn resolve_conflict(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<ResolvedVersion> {
        reporter.warn(&conflict_warning(layout));

        let Some(tooling) = self.env.tooling else {
            return Err(BuildpackError::ToolingConflict);
        };

        reporter.info(&format!(
            "Choosing an .NET SDK with {} because {}={}",
            tooling,
            crate::config::env::TOOLING_VAR,
            tooling
        ));

        let version = match tooling {
            Tooling::Msbuild => self.manifest.latest_sdk_version(Tooling::Msbuild)?,
            Tooling::ProjectJson => {
                let version = self.manifest.default_sdk_version()?;
                reporter.warn(PROJECT_JSON_DEPRECATION);
                version
            }
        };

        Ok(ResolvedVersion::new(
            version,
            VersionSource::ToolingOverride(tooling),
        ))
    }

    /// Version pinned in `global.json`
    ///
    /// Unparsable JSON is reported and ignored; JSON without
    /// `sdk.version` is silently ignored.
    fn global_json_version(&self, reporter: &dyn Reporter) -> BuildpackResult<Option<String>> {
        let path = self.app_root.join(GLOBAL_JSON);
        if !path.is_file() {
            return Ok(None);
        }

        let content = read_text(&path)?;
        let json: serde_json::Value = match serde_json::from_str(&content) {
            Ok(json) => json,
            Err(e) => {
                debug!("Failed to parse {}: {}", path.display(), e);
                reporter.warn(&format!("File {} is not valid JSON", path.display()));
                return Ok(None);
            }
        };

        Ok(json
            .pointer("/sdk/version")
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }
}

fn join_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn conflict_warning(layout: &ProjectLayout) -> String {
    format!(
        "Found both project.json and *.csproj files in app:\n\
         Directories with *.csproj: {}\n\
         Directories with project.json: {}\n\
         Please provide a global.json file that specifies the\n\
         correct .NET SDK version for this app",
        join_dirs(&layout.csproj_dirs),
        join_dirs(&layout.project_json_dirs)
    )
}
