//! The compile pipeline
//!
//! Steps run strictly in order and the first failure stops the run:
//!
//! 1. Scan the app for projects
//! 2. Restore installer directories from the buildpack cache
//! 3. Clear the NuGet cache when disabled or stale
//! 4. Restore the NuGet cache when still valid
//! 5. Run every installer whose gate says there is work to do
//! 6. `dotnet restore` unless the app was published
//! 7. Install the required .NET Core runtime frameworks
//! 8. Save installer directories and NuGet packages to the cache
//!
//! Saving is best effort per directory: a failed copy is reported and its
//! cache entry removed, and the remaining directories are still saved.

mod step;

pub use step::{StepOutcome, StepRecord, StepRunner};

use crate::cache::{CacheStore, NUGET_CACHE_DIR};
use crate::config::BuildEnv;
use crate::error::BuildpackResult;
use crate::installer::{DotnetFramework, Fetcher, InstallContext, InstallerSet};
use crate::project::{AppDir, ProjectLayout};
use crate::ui::Reporter;
use tracing::{debug, warn};

const NUGET_CACHE_NAME: &str = "Nuget packages";

/// Result of one compile run
#[derive(Debug)]
pub struct CompileReport {
    /// Steps in the order they ran
    pub steps: Vec<StepRecord>,

    /// Overall result; the first failed step's error
    pub result: BuildpackResult<()>,
}

impl CompileReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Descriptions of the steps that ran
    pub fn step_descriptions(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.description.as_str()).collect()
    }
}

/// Drives installers and the buildpack cache for one app
pub struct Compiler {
    app: AppDir,
    store: CacheStore,
    installers: InstallerSet,
    env: BuildEnv,
    fetcher: Fetcher,
}

impl Compiler {
    /// Create a compiler for the build described by `ctx`
    pub fn new(ctx: &InstallContext, installers: InstallerSet) -> Self {
        Self {
            app: AppDir::new(&ctx.build_dir),
            store: CacheStore::new(&ctx.build_dir, &ctx.cache_dir),
            installers,
            env: ctx.env.clone(),
            fetcher: ctx.fetcher.clone(),
        }
    }

    /// Run every step
    pub async fn compile(&self, reporter: &dyn Reporter) -> CompileReport {
        let mut steps = StepRunner::new(reporter);
        let result = self.run_steps(&mut steps, reporter).await;
        CompileReport {
            steps: steps.into_records(),
            result,
        }
    }

    async fn run_steps(
        &self,
        steps: &mut StepRunner<'_>,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<()> {
        let layout = steps
            .run("Scanning application for projects", async { self.app.layout() })
            .await?;

        steps
            .run("Restoring files from buildpack cache", async {
                self.restore_cache()
            })
            .await?;

        const CLEAR_NUGET: &str = "Clearing NuGet packages cache";
        if steps.guard(CLEAR_NUGET, self.should_clear_nuget_cache(&layout, reporter))? {
            steps
                .run(CLEAR_NUGET, async { self.store.remove(NUGET_CACHE_DIR) })
                .await?;
        }

        steps
            .run("Restoring NuGet packages cache", async {
                self.restore_nuget_cache(&layout, reporter)
            })
            .await?;

        for installer in self.installers.iter() {
            let description = installer.install_description();
            if steps.guard(&description, installer.should_install(&layout, reporter))? {
                steps
                    .run(&description, installer.install(&layout, reporter))
                    .await?;
            }
        }

        if let Some(sdk) = self.installers.sdk() {
            if sdk.should_restore(&layout) {
                steps
                    .run(
                        "Restoring dependencies with Dotnet CLI",
                        sdk.restore(&layout, reporter),
                    )
                    .await?;
            }

            let framework = DotnetFramework::new(
                self.store.build_dir(),
                self.store.build_path(NUGET_CACHE_DIR),
                sdk.install_dir(),
                self.fetcher.clone(),
            );
            steps
                .run("Installing .NET Framework(s)", framework.install(reporter))
                .await?;
        }

        steps
            .run("Saving to buildpack cache", async {
                self.save_cache(reporter);
                Ok(())
            })
            .await
    }

    fn restore_cache(&self) -> BuildpackResult<()> {
        for (_, dir) in self.installers.cache_dirs() {
            if self.store.is_cached(dir) {
                self.store.restore(dir)?;
            }
        }
        Ok(())
    }

    /// Cached packages are reused only while the cached SDK still matches
    fn nuget_cache_is_valid(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<bool> {
        let Some(sdk) = self.installers.sdk() else {
            return Ok(false);
        };
        if !self.store.is_cached(NUGET_CACHE_DIR) {
            return Ok(false);
        }
        Ok(!sdk.should_install(layout, reporter)?)
    }

    fn should_clear_nuget_cache(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<bool> {
        if !self.store.is_cached(NUGET_CACHE_DIR) {
            return Ok(false);
        }
        if !self.env.cache_nuget_packages {
            debug!("NuGet package caching disabled");
            return Ok(true);
        }
        Ok(!self.nuget_cache_is_valid(layout, reporter)?)
    }

    fn restore_nuget_cache(
        &self,
        layout: &ProjectLayout,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<()> {
        if self.nuget_cache_is_valid(layout, reporter)? {
            self.store.restore(NUGET_CACHE_DIR)?;
        }
        Ok(())
    }

    fn save_cache(&self, reporter: &dyn Reporter) {
        for (name, dir) in self.installers.cache_dirs() {
            self.save_entry(name, dir, reporter);
        }
        if self.env.cache_nuget_packages {
            self.save_entry(NUGET_CACHE_NAME, NUGET_CACHE_DIR, reporter);
        }
    }

    fn save_entry(&self, name: &str, dir: &str, reporter: &dyn Reporter) {
        if !self.store.is_built(dir) {
            return;
        }
        let Err(e) = self.store.save(dir) else {
            return;
        };

        warn!("Saving {} to cache failed: {}", dir, e);
        reporter.warn(&format!("Failed to save cached files for {}", name));
        if let Err(e) = self.store.remove(dir) {
            warn!("Removing partial cache {} failed: {}", dir, e);
        }
    }
}
