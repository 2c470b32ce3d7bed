//! .NET SDK installer
//!
//! Besides installing the SDK, this installer owns the `dotnet restore`
//! step for `project.json` apps, since restore runs the SDK it installed.

use super::archive::LIBUNWIND_DIR;
use super::{marker, InstallContext};
use crate::error::BuildpackResult;
use crate::project::ProjectLayout;
use crate::sdk::{ResolvedVersion, SdkVersionResolver};
use crate::shell::{quote, CommandSpec};
use crate::ui::Reporter;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::debug;

/// SDK install and cache directory
pub const DOTNET_DIR: &str = ".dotnet";

/// Installs the .NET SDK picked by [`SdkVersionResolver`]
///
/// The version is resolved once per run and reused by every gate.
pub struct SdkInstaller {
    ctx: InstallContext,
    resolved: OnceLock<ResolvedVersion>,
}

impl SdkInstaller {
    /// Create an installer for the build described by `ctx`
    pub fn new(ctx: InstallContext) -> Self {
        Self {
            ctx,
            resolved: OnceLock::new(),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        ".NET SDK"
    }

    /// Cache subdirectory
    pub fn cache_dir(&self) -> &str {
        DOTNET_DIR
    }

    /// SDK location in the build dir
    pub fn install_dir(&self) -> PathBuf {
        self.ctx.build_dir.join(DOTNET_DIR)
    }

    /// Resolve the SDK version for `layout`, reporting resolution notices
    /// the first time only
    pub fn resolve_version(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<&ResolvedVersion> {
        if let Some(resolved) = self.resolved.get() {
            return Ok(resolved);
        }

        let resolved = SdkVersionResolver::new(&self.ctx.build_dir, &self.ctx.manifest, &self.ctx.env)
            .resolve(layout, reporter)?;
        debug!("Resolved .NET SDK {}", resolved);
        Ok(self.resolved.get_or_init(|| resolved))
    }

    fn version(&self, layout: &ProjectLayout, reporter: &dyn Reporter) -> BuildpackResult<String> {
        Ok(self.resolve_version(layout, reporter)?.version.clone())
    }

    /// Whether the cache already holds the resolved SDK
    pub fn is_cached(&self, layout: &ProjectLayout, reporter: &dyn Reporter) -> BuildpackResult<bool> {
        let cached = self.ctx.cache_dir.join(DOTNET_DIR);
        if !cached.exists() {
            return Ok(false);
        }
        marker::contains_version(&cached, &self.version(layout, reporter)?)
    }

    /// Install unless the app was published or the SDK is cached
    pub fn should_install(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<bool> {
        let published = layout
            .published_project
            .as_ref()
            .is_some_and(|name| self.ctx.build_dir.join(name).exists());
        if published {
            debug!("App is published, skipping .NET SDK install");
            return Ok(false);
        }

        Ok(!self.is_cached(layout, reporter)?)
    }

    /// A restore is needed unless the app was published
    pub fn should_restore(&self, layout: &ProjectLayout) -> bool {
        layout.published_project.is_none()
    }

    /// Fetch the SDK into the build dir and record its version
    pub async fn install(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<()> {
        let version = self.version(layout, reporter)?;
        let dest = self.install_dir();

        reporter.info(&format!(".NET SDK version: {}", version));
        self.ctx
            .fetcher
            .fetch_and_extract(&sdk_archive(&version), &dest, 0, reporter)
            .await?;
        marker::record_version(&dest, &version)
    }

    /// Run `dotnet restore` over every `project.json` directory
    pub async fn restore(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<()> {
        let command = self.restore_command(layout);
        self.ctx.fetcher.shell().exec(&command, reporter).await
    }

    fn restore_command(&self, layout: &ProjectLayout) -> CommandSpec {
        let build_dir = &self.ctx.build_dir;
        let projects: Vec<String> = layout
            .project_json_dirs
            .iter()
            .map(|dir| quote(dir))
            .collect();

        let mut script = format!(
            "dotnet restore --verbosity {}",
            self.ctx.env.restore_verbosity()
        );
        for project in &projects {
            script.push(' ');
            script.push_str(project);
        }

        CommandSpec::new(script)
            .current_dir(build_dir)
            .export("HOME", build_dir.display().to_string())
            .export(
                "LD_LIBRARY_PATH",
                format!("$LD_LIBRARY_PATH:{}", build_dir.join(LIBUNWIND_DIR).join("lib").display()),
            )
            .export("PATH", format!("$PATH:{}", self.install_dir().display()))
    }
}

fn sdk_archive(version: &str) -> String {
    format!("dotnet.{}.linux-amd64.tar.gz", version)
}
