//! SDK version command - show which .NET SDK an app would get

use super::{require_dir, Buildpack};
use crate::cli::args::AppArgs;
use crate::error::BuildpackResult;
use crate::project::AppDir;
use crate::sdk::SdkVersionResolver;
use crate::ui::{self, ConsoleReporter, UiContext};

/// Execute the sdk-version command
pub async fn execute(args: AppArgs, buildpack: &Buildpack) -> BuildpackResult<()> {
    require_dir(&args.build_dir)?;

    let ctx = UiContext::detect();
    let manifest = buildpack.manifest()?;
    let layout = AppDir::new(&args.build_dir).layout()?;

    let reporter = ConsoleReporter::new(ctx.clone());
    let resolved = SdkVersionResolver::new(&args.build_dir, &manifest, &buildpack.env)
        .resolve(&layout, &reporter)?;

    ui::key_value(&ctx, "version", &resolved.version);
    ui::key_value(&ctx, "source", &resolved.source.to_string());
    Ok(())
}
