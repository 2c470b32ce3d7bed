//! .NET Core runtime framework install
//!
//! A published app names its framework in `<app>.runtimeconfig.json`.
//! Otherwise every `microsoft.netcore.app` version restored into the NuGet
//! cache needs a matching shared runtime next to the SDK.

use super::fetch::Fetcher;
use crate::error::BuildpackResult;
use crate::project::{scan, RUNTIMECONFIG_SUFFIX};
use crate::text::read_text;
use crate::ui::Reporter;
use std::path::{Path, PathBuf};
use tracing::debug;

const NETCORE_APP_PACKAGE: &str = "packages/microsoft.netcore.app";
const SHARED_RUNTIME_DIR: &str = "shared/Microsoft.NETCore.App";

/// Installs the shared runtimes an app needs into the SDK directory
pub struct DotnetFramework {
    build_dir: PathBuf,
    nuget_dir: PathBuf,
    dotnet_dir: PathBuf,
    fetcher: Fetcher,
}

impl DotnetFramework {
    /// Create an installer over the build dir, its NuGet cache and SDK dir
    pub fn new(
        build_dir: impl Into<PathBuf>,
        nuget_dir: impl Into<PathBuf>,
        dotnet_dir: impl Into<PathBuf>,
        fetcher: Fetcher,
    ) -> Self {
        Self {
            build_dir: build_dir.into(),
            nuget_dir: nuget_dir.into(),
            dotnet_dir: dotnet_dir.into(),
            fetcher,
        }
    }

    /// Framework versions the app requires, sorted
    pub fn versions(&self) -> BuildpackResult<Vec<String>> {
        let published = scan::find_in_root(&self.build_dir, RUNTIMECONFIG_SUFFIX)?;
        if let Some(name) = published.first() {
            let path = self
                .build_dir
                .join(format!("{}{}", name, RUNTIMECONFIG_SUFFIX));
            return Ok(runtimeconfig_version(&path)?.into_iter().collect());
        }

        restored_versions(&self.nuget_dir.join(NETCORE_APP_PACKAGE))
    }

    fn is_installed(&self, version: &str) -> bool {
        self.dotnet_dir.join(SHARED_RUNTIME_DIR).join(version).exists()
    }

    /// Fetch every required framework missing from the SDK directory
    pub async fn install(&self, reporter: &dyn Reporter) -> BuildpackResult<()> {
        for version in self.versions()? {
            if self.is_installed(&version) {
                reporter.info(&format!("Using .NET Core runtime {}", version));
                continue;
            }

            reporter.info(&format!("Downloading and installing .NET Core runtime {}", version));
            self.fetcher
                .fetch_and_extract(&framework_archive(&version), &self.dotnet_dir, 0, reporter)
                .await?;
        }
        Ok(())
    }
}

fn framework_archive(version: &str) -> String {
    format!("dotnet-framework.{}.linux-amd64.tar.gz", version)
}

/// `runtimeOptions.framework.version` from a runtime config
fn runtimeconfig_version(path: &Path) -> BuildpackResult<Option<String>> {
    let json: serde_json::Value = serde_json::from_str(&read_text(path)?)?;
    let version = json
        .pointer("/runtimeOptions/framework/version")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    debug!("{} requires framework {:?}", path.display(), version);
    Ok(version)
}

fn restored_versions(package_dir: &Path) -> BuildpackResult<Vec<String>> {
    if !package_dir.is_dir() {
        return Ok(Vec::new());
    }
    scan::subdirectories(package_dir)
}
