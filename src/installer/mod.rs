//! Installable build dependencies
//!
//! The set of installers is closed: the .NET SDK plus three archive
//! installers. [`Installer`] dispatches over them and [`InstallerSet`]
//! keeps them in pipeline order.

pub mod archive;
pub mod factory;
pub mod fetch;
pub mod framework;
pub mod marker;
pub mod sdk;

pub use archive::{ArchiveInstaller, ArchiveSpec};
pub use factory::create_installers;
pub use fetch::Fetcher;
pub use framework::DotnetFramework;
pub use sdk::{SdkInstaller, DOTNET_DIR};

use crate::config::BuildEnv;
use crate::error::BuildpackResult;
use crate::project::ProjectLayout;
use crate::sdk::SdkManifest;
use crate::ui::Reporter;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything an installer needs to know about the current build
#[derive(Clone)]
pub struct InstallContext {
    /// App tree being compiled
    pub build_dir: PathBuf,

    /// Persistent buildpack cache
    pub cache_dir: PathBuf,

    /// Known dependency versions
    pub manifest: Arc<SdkManifest>,

    /// Environment settings
    pub env: BuildEnv,

    /// Download and extract helper
    pub fetcher: Fetcher,
}

/// One installable dependency
pub enum Installer {
    DotnetSdk(SdkInstaller),
    Libunwind(ArchiveInstaller),
    NodeJs(ArchiveInstaller),
    Bower(ArchiveInstaller),
}

impl Installer {
    /// Display name
    pub fn name(&self) -> &str {
        match self {
            Self::DotnetSdk(sdk) => sdk.name(),
            Self::Libunwind(a) | Self::NodeJs(a) | Self::Bower(a) => a.name(),
        }
    }

    /// Directory shared between the build dir and the cache, if any
    pub fn cache_dir(&self) -> Option<&str> {
        match self {
            Self::DotnetSdk(sdk) => Some(sdk.cache_dir()),
            Self::Libunwind(a) | Self::NodeJs(a) | Self::Bower(a) => a.cache_dir(),
        }
    }

    /// Step description shown while installing
    pub fn install_description(&self) -> String {
        format!("Installing {}", self.name())
    }

    /// Whether `install` has work to do
    pub fn should_install(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<bool> {
        match self {
            Self::DotnetSdk(sdk) => sdk.should_install(layout, reporter),
            Self::Libunwind(a) | Self::NodeJs(a) | Self::Bower(a) => a.should_install(),
        }
    }

    /// Fetch and unpack into the build dir
    pub async fn install(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<()> {
        match self {
            Self::DotnetSdk(sdk) => sdk.install(layout, reporter).await,
            Self::Libunwind(a) | Self::NodeJs(a) | Self::Bower(a) => a.install(reporter).await,
        }
    }
}

/// Installers in the order the pipeline runs them
#[derive(Default)]
pub struct InstallerSet {
    installers: Vec<Installer>,
}

impl InstallerSet {
    /// Wrap installers, keeping their order
    pub fn new(installers: Vec<Installer>) -> Self {
        Self { installers }
    }

    /// Iterate in pipeline order
    pub fn iter(&self) -> impl Iterator<Item = &Installer> {
        self.installers.iter()
    }

    /// The SDK installer, if the set has one
    pub fn sdk(&self) -> Option<&SdkInstaller> {
        self.installers.iter().find_map(|installer| match installer {
            Installer::DotnetSdk(sdk) => Some(sdk),
            _ => None,
        })
    }

    /// `(name, cache dir)` of every cacheable installer
    pub fn cache_dirs(&self) -> Vec<(&str, &str)> {
        self.installers
            .iter()
            .filter_map(|i| i.cache_dir().map(|dir| (i.name(), dir)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.installers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installers.is_empty()
    }
}
