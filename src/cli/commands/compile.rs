//! Compile command - build the droplet contents for an app

use super::{require_dir, Buildpack};
use crate::cli::args::CompileArgs;
use crate::error::{BuildpackError, BuildpackResult};
use crate::installer::{create_installers, Fetcher, InstallContext};
use crate::pipeline::Compiler;
use crate::shell::{Shell, SystemShell};
use crate::ui::{self, ConsoleReporter, UiContext};
use std::sync::Arc;
use tracing::{debug, info};

/// Execute the compile command
pub async fn execute(args: CompileArgs, buildpack: &Buildpack) -> BuildpackResult<()> {
    execute_with_shell(args, buildpack, Arc::new(SystemShell::new())).await
}

/// Execute the compile command with a given command runner
pub async fn execute_with_shell(
    args: CompileArgs,
    buildpack: &Buildpack,
    shell: Arc<dyn Shell>,
) -> BuildpackResult<()> {
    let ctx = UiContext::detect();
    if ctx.use_fancy_output() {
        ui::init_theme();
    }

    println!(
        "ASP.NET Core buildpack version: {}",
        buildpack.config.buildpack.version
    );
    ui::intro(&ctx, "ASP.NET Core buildpack starting compile");

    require_dir(&args.build_dir)?;
    std::fs::create_dir_all(&args.cache_dir).map_err(|e| {
        BuildpackError::io(format!("creating {}", args.cache_dir.display()), e)
    })?;

    let manifest = buildpack.manifest()?;
    debug!("Using manifest {}", manifest.path().display());

    let settings = &buildpack.config.buildpack;
    let fetcher = Fetcher::new(
        shell,
        settings.download_command_path(&buildpack.root),
        buildpack.root.join(&settings.download_dir),
    );

    let install_ctx = InstallContext {
        build_dir: args.build_dir,
        cache_dir: args.cache_dir,
        manifest: Arc::new(manifest),
        env: buildpack.env.clone(),
        fetcher,
    };
    let installers = create_installers(&buildpack.config.installers, &install_ctx);
    info!("Compiling {} with {} installers", install_ctx.build_dir.display(), installers.len());

    let reporter = ConsoleReporter::new(ctx.clone());
    let report = Compiler::new(&install_ctx, installers)
        .compile(&reporter)
        .await;

    if report.result.is_err() {
        ui::outro_error(&ctx, "ASP.NET Core buildpack failed to compile the app");
    }
    report.result?;
    ui::outro_success(&ctx, "ASP.NET Core buildpack is done creating the droplet");
    Ok(())
}
