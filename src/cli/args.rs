//! CLI argument definitions using clap derive

use crate::config::env::{CACHE_NUGET_PACKAGES_VAR, DEBUG_VAR, TOOLING_VAR};
use crate::config::BuildEnv;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// ASP.NET Core buildpack
///
/// Compiles .NET Core apps for the platform: picks the .NET SDK, installs
/// it with its native dependencies and restores the app's packages.
#[derive(Parser, Debug)]
#[command(name = "dotnet-buildpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Buildpack configuration file path
    #[arg(short, long, global = true, env = "BUILDPACK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub env: EnvArgs,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the app in BUILD_DIR, caching in CACHE_DIR
    Compile(CompileArgs),

    /// Print the .NET SDK version an app would be built with
    SdkVersion(AppArgs),

    /// Print the project the app runs
    Project(AppArgs),
}

/// Arguments for the compile command
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// App directory the droplet is built from
    pub build_dir: PathBuf,

    /// Directory persisted between builds
    pub cache_dir: PathBuf,
}

/// Arguments for commands inspecting an app
#[derive(Parser, Debug)]
pub struct AppArgs {
    /// App directory
    pub build_dir: PathBuf,
}

/// Staging environment variables
#[derive(Args, Debug, Default)]
pub struct EnvArgs {
    /// SDK tooling for apps with both project.json and *.csproj
    #[arg(long, global = true, env = TOOLING_VAR, hide = true)]
    pub dotnet_sdk_tooling: Option<String>,

    /// Restore with debug verbosity
    #[arg(long, global = true, env = DEBUG_VAR, hide = true)]
    pub bp_debug: Option<String>,

    /// Set to `false` to stop caching NuGet packages
    #[arg(long, global = true, env = CACHE_NUGET_PACKAGES_VAR, hide = true)]
    pub cache_nuget_packages: Option<String>,
}

impl EnvArgs {
    /// Settings threaded through the compile
    pub fn build_env(&self) -> BuildEnv {
        BuildEnv::from_values(
            self.dotnet_sdk_tooling.as_deref(),
            self.bp_debug.as_deref(),
            self.cache_nuget_packages.as_deref(),
        )
    }
}
