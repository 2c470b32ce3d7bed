//! ASP.NET Core buildpack
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use dotnet_buildpack::cli::commands::{self, Buildpack};
use dotnet_buildpack::cli::{Cli, Commands};
use dotnet_buildpack::config::ConfigManager;
use dotnet_buildpack::error::BuildpackResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> BuildpackResult<()> {
    let cli = Cli::parse();

    // 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("dotnet_buildpack=warn"),
        1 => EnvFilter::new("dotnet_buildpack=info"),
        _ => EnvFilter::new("dotnet_buildpack=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Project discovery needs no buildpack configuration
    if let Commands::Project(args) = cli.command {
        return commands::project(args).await;
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    debug!("Using config {}", config_manager.path().display());

    let config = config_manager.load().await?;
    let buildpack = Buildpack::new(config, config_manager.root(), cli.env.build_env());

    match cli.command {
        Commands::Project(_) => unreachable!("Project handled above"),
        Commands::Compile(args) => commands::compile(args, &buildpack).await,
        Commands::SdkVersion(args) => commands::sdk_version(args, &buildpack).await,
    }
}
