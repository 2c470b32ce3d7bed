//! Process environment settings
//!
//! The staging environment steers the compile through three variables.
//! They are read once at startup (through clap's `env` support) and the
//! resulting [`BuildEnv`] is passed down explicitly.

use std::fmt;

/// Selects the SDK tooling family when an app has both descriptor kinds
pub const TOOLING_VAR: &str = "DOTNET_SDK_TOOLING";

/// Any non-empty value raises `dotnet restore` verbosity
pub const DEBUG_VAR: &str = "BP_DEBUG";

/// `false` disables caching of restored NuGet packages
pub const CACHE_NUGET_PACKAGES_VAR: &str = "CACHE_NUGET_PACKAGES";

/// .NET SDK tooling family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tooling {
    /// `*.csproj` projects built with msbuild
    Msbuild,
    /// Legacy `project.json` projects
    ProjectJson,
}

impl Tooling {
    /// Parse the value of `DOTNET_SDK_TOOLING`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "msbuild" => Some(Self::Msbuild),
            "project.json" => Some(Self::ProjectJson),
            _ => None,
        }
    }

    /// The keyword users set to select this tooling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Msbuild => "msbuild",
            Self::ProjectJson => "project.json",
        }
    }
}

impl fmt::Display for Tooling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment-derived settings, fixed for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnv {
    /// Tooling override from `DOTNET_SDK_TOOLING`
    pub tooling: Option<Tooling>,

    /// Whether `BP_DEBUG` is set
    pub debug: bool,

    /// Whether NuGet packages are cached between builds
    pub cache_nuget_packages: bool,
}

impl BuildEnv {
    /// Build settings from raw variable values
    pub fn from_values(
        tooling: Option<&str>,
        debug: Option<&str>,
        cache_nuget_packages: Option<&str>,
    ) -> Self {
        Self {
            tooling: tooling.and_then(Tooling::parse),
            debug: debug.is_some_and(|v| !v.is_empty()),
            cache_nuget_packages: cache_nuget_packages != Some("false"),
        }
    }

    /// Verbosity passed to `dotnet restore`
    pub fn restore_verbosity(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "minimal"
        }
    }
}

impl Default for BuildEnv {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}
