//! Compile pipeline scenarios against a fake shell

use crate::support::{compile, write, FakeShell, Staging, RESTORED_FRAMEWORK};
use dotnet_buildpack::config::BuildEnv;
use dotnet_buildpack::installer::marker;
use dotnet_buildpack::pipeline::StepOutcome;
use dotnet_buildpack::BuildpackError;
use std::fs;
use std::sync::Arc;

fn csproj_app(staging: &Staging) {
    write(staging.build.path(), "src/app/app.csproj", "<Project />");
}

#[tokio::test]
async fn cold_cache_installs_everything() {
    let staging = Staging::new();
    csproj_app(&staging);
    let shell = Arc::new(FakeShell::default());

    let (report, reporter) = compile(&staging, BuildEnv::default(), shell.clone()).await;

    assert!(report.is_success(), "{:?}", report.result);
    assert_eq!(
        report.step_descriptions(),
        vec![
            "Scanning application for projects",
            "Restoring files from buildpack cache",
            "Restoring NuGet packages cache",
            "Installing libunwind",
            "Installing .NET SDK",
            "Installing Node.js",
            "Installing Bower",
            "Restoring dependencies with Dotnet CLI",
            "Installing .NET Framework(s)",
            "Saving to buildpack cache",
        ]
    );
    assert_eq!(shell.downloads().len(), 5);
    assert!(reporter
        .infos()
        .contains(&".NET SDK version: sdk-version-4".to_string()));

    assert_eq!(
        marker::recorded_versions(&staging.build_path(".dotnet")).unwrap(),
        vec!["sdk-version-4"]
    );
    for dir in ["libunwind", ".dotnet", ".node", ".bower", ".nuget"] {
        assert!(staging.cache_path(dir).is_dir(), "{} not cached", dir);
    }
}

#[tokio::test]
async fn warm_cache_skips_installs() {
    let staging = Staging::new();
    csproj_app(&staging);
    let (first, _) = compile(&staging, BuildEnv::default(), Arc::new(FakeShell::default())).await;
    assert!(first.is_success());

    let staging = staging.next_build();
    csproj_app(&staging);
    let shell = Arc::new(FakeShell::default());
    let (report, reporter) = compile(&staging, BuildEnv::default(), shell.clone()).await;

    assert!(report.is_success(), "{:?}", report.result);
    assert!(
        report
            .step_descriptions()
            .iter()
            .all(|d| !d.starts_with("Installing ") || *d == "Installing .NET Framework(s)"),
        "{:?}",
        report.step_descriptions()
    );
    assert!(report
        .step_descriptions()
        .contains(&"Restoring files from buildpack cache"));
    assert!(report.step_descriptions().contains(&"Saving to buildpack cache"));
    assert!(shell.downloads().is_empty());

    assert!(staging.build_path(".nuget/packages").is_dir());
    assert!(reporter
        .infos()
        .contains(&format!("Using .NET Core runtime {}", RESTORED_FRAMEWORK)));
}

#[tokio::test]
async fn failed_restore_stops_pipeline() {
    let staging = Staging::new();
    write(staging.build.path(), "src/app/project.json", "{}");
    let shell = Arc::new(FakeShell::failing_on("dotnet restore"));

    let (report, _) = compile(&staging, BuildEnv::default(), shell.clone()).await;

    let err = report.result.as_ref().unwrap_err();
    assert!(matches!(err, BuildpackError::StepFailed { .. }));
    assert!(err
        .to_string()
        .starts_with("Restoring dependencies with Dotnet CLI failed, Command exited with code 1"));

    let last = report.steps.last().unwrap();
    assert_eq!(last.description, "Restoring dependencies with Dotnet CLI");
    assert!(matches!(last.outcome, StepOutcome::Failed(_)));
    assert!(!report
        .step_descriptions()
        .contains(&"Saving to buildpack cache"));
    assert!(!staging.cache_path(".dotnet").exists());

    let restore = shell.commands().pop().unwrap();
    assert!(restore.contains("dotnet restore --verbosity minimal 'src/app'"));
}

#[tokio::test]
async fn failed_download_stops_at_installer() {
    let staging = Staging::new();
    csproj_app(&staging);
    let shell = Arc::new(FakeShell::failing_on("node-v6.9.1-linux-x64.tar.gz"));

    let (report, _) = compile(&staging, BuildEnv::default(), shell).await;

    assert!(!report.is_success());
    assert_eq!(report.steps.last().unwrap().description, "Installing Node.js");
    assert!(!report.step_descriptions().contains(&"Installing Bower"));
}

#[tokio::test]
async fn cache_save_failure_is_isolated() {
    let staging = Staging::new();
    csproj_app(&staging);
    fs::write(staging.cache_path(".bower"), "not a directory").unwrap();

    let (report, reporter) =
        compile(&staging, BuildEnv::default(), Arc::new(FakeShell::default())).await;

    assert!(report.is_success(), "{:?}", report.result);
    assert_eq!(
        reporter.warnings(),
        vec!["Failed to save cached files for Bower"]
    );
    assert!(!staging.cache_path(".bower").exists());
    assert!(staging.cache_path(".dotnet/VERSION").is_file());
    assert!(staging.cache_path(".node").is_dir());
    assert!(staging.cache_path(".nuget").is_dir());
}

#[tokio::test]
async fn tooling_conflict_fails_at_sdk_install() {
    let staging = Staging::new();
    write(staging.build.path(), "src/app/app.csproj", "x");
    write(staging.build.path(), "src/app/project.json", "{}");
    let shell = Arc::new(FakeShell::default());

    let (report, reporter) = compile(&staging, BuildEnv::default(), shell.clone()).await;

    assert_eq!(
        report.result.unwrap_err().to_string(),
        "Installing .NET SDK failed, App contains both a project.json and a *.csproj file"
    );
    let last = report.steps.last().unwrap();
    assert_eq!(last.description, "Installing .NET SDK");
    assert!(!last.outcome.is_success());
    assert!(reporter.warnings()[0].starts_with("Found both project.json and *.csproj"));
    assert!(shell
        .downloads()
        .iter()
        .all(|c| !c.contains("dotnet.")));
}

#[tokio::test]
async fn tooling_override_resolves_conflict() {
    let staging = Staging::new();
    write(staging.build.path(), "src/app/app.csproj", "x");
    write(staging.build.path(), "src/app/project.json", "{}");
    let env = BuildEnv::from_values(Some("msbuild"), None, None);

    let (report, reporter) = compile(&staging, env, Arc::new(FakeShell::default())).await;

    assert!(report.is_success(), "{:?}", report.result);
    assert_eq!(
        reporter.infos()[0],
        "Choosing an .NET SDK with msbuild because DOTNET_SDK_TOOLING=msbuild"
    );
}

#[tokio::test]
async fn disabled_nuget_cache_is_cleared_and_not_saved() {
    let staging = Staging::new();
    csproj_app(&staging);
    write(staging.cache.path(), ".nuget/packages/old/1.0.0/old.nupkg", "x");
    let env = BuildEnv::from_values(None, None, Some("false"));

    let (report, _) = compile(&staging, env, Arc::new(FakeShell::default())).await;

    assert!(report.is_success(), "{:?}", report.result);
    assert!(report
        .step_descriptions()
        .contains(&"Clearing NuGet packages cache"));
    assert!(staging.build_path(".nuget").is_dir());
    assert!(!staging.cache_path(".nuget").exists());
}

#[tokio::test]
async fn nuget_cache_cleared_when_sdk_changes() {
    let staging = Staging::new();
    csproj_app(&staging);
    write(staging.cache.path(), ".nuget/packages/old/1.0.0/old.nupkg", "x");
    marker::record_version(&staging.cache_path(".dotnet"), "sdk-version-3").unwrap();
    let shell = Arc::new(FakeShell::default());

    let (report, _) = compile(&staging, BuildEnv::default(), shell.clone()).await;

    assert!(report.is_success(), "{:?}", report.result);
    assert!(report
        .step_descriptions()
        .contains(&"Clearing NuGet packages cache"));
    assert!(!staging.build_path(".nuget/packages/old").exists());
    assert!(shell
        .downloads()
        .iter()
        .any(|c| c.contains("dotnet.sdk-version-4.linux-amd64.tar.gz")));
    assert_eq!(
        marker::recorded_versions(&staging.cache_path(".dotnet")).unwrap(),
        vec!["sdk-version-3", "sdk-version-4"]
    );
}

fn published_app(staging: &Staging) {
    write(
        staging.build.path(),
        "app.runtimeconfig.json",
        r#"{"runtimeOptions":{"framework":{"name":"Microsoft.NETCore.App","version":"1.0.5"}}}"#,
    );
    write(staging.build.path(), "app", "binary");
}

#[tokio::test]
async fn published_app_skips_sdk_and_restore() {
    let staging = Staging::new();
    published_app(&staging);
    let shell = Arc::new(FakeShell::default());

    let (report, reporter) = compile(&staging, BuildEnv::default(), shell.clone()).await;

    assert!(report.is_success(), "{:?}", report.result);
    let steps = report.step_descriptions();
    assert!(!steps.contains(&"Installing .NET SDK"));
    assert!(!steps.contains(&"Restoring dependencies with Dotnet CLI"));
    assert!(steps.contains(&"Installing .NET Framework(s)"));
    assert!(staging
        .build_path(".dotnet/shared/Microsoft.NETCore.App/1.0.5")
        .is_dir());
    assert!(reporter.warnings().is_empty(), "{:?}", reporter.warnings());
}

#[tokio::test]
async fn published_app_with_mixed_sources_needs_no_sdk_version() {
    let staging = Staging::new();
    published_app(&staging);
    write(staging.build.path(), "src/a/a.csproj", "<Project />");
    write(staging.build.path(), "src/b/project.json", "{}");
    let shell = Arc::new(FakeShell::default());

    let (report, reporter) = compile(&staging, BuildEnv::default(), shell.clone()).await;

    assert!(report.is_success(), "{:?}", report.result);
    assert!(reporter.warnings().is_empty(), "{:?}", reporter.warnings());
    assert!(!report
        .step_descriptions()
        .contains(&"Installing .NET SDK"));
    assert!(shell
        .downloads()
        .iter()
        .all(|c| !c.contains("dotnet.")));
}
