//! Integration tests for the buildpack

mod pipeline_tests;
mod support;

mod cli_tests {
    use crate::support::{write, MANIFEST_YML, TOOLS_YML};
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn buildpack() -> Command {
        let mut cmd = cargo_bin_cmd!("dotnet-buildpack");
        cmd.env_remove("DOTNET_SDK_TOOLING")
            .env_remove("BP_DEBUG")
            .env_remove("CACHE_NUGET_PACKAGES")
            .env_remove("BUILDPACK_CONFIG");
        cmd
    }

    /// Buildpack root holding a config, manifest and tooling mapping
    fn buildpack_root() -> TempDir {
        let root = TempDir::new().unwrap();
        write(root.path(), "manifest.yml", MANIFEST_YML);
        write(root.path(), "dotnet-sdk-tools.yml", TOOLS_YML);
        write(
            root.path(),
            "buildpack.toml",
            "[buildpack]\nversion = \"1.0.9\"\n",
        );
        root
    }

    #[test]
    fn help_displays() {
        buildpack()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("ASP.NET Core buildpack"));
    }

    #[test]
    fn version_displays() {
        buildpack()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("dotnet-buildpack"));
    }

    #[test]
    fn project_prints_single_project() {
        let app = TempDir::new().unwrap();
        write(app.path(), "src/app/project.json", "{}");

        buildpack()
            .arg("project")
            .arg(app.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("src/app"));
    }

    #[test]
    fn project_ambiguous_without_deployment_file() {
        let app = TempDir::new().unwrap();
        write(app.path(), "src/proj1/project.json", "{}");
        write(app.path(), "src/proj2/project.json", "{}");

        buildpack()
            .arg("project")
            .arg(app.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Multiple paths contain a project.json file, but no .deployment file was used",
            ))
            .stderr(predicate::str::contains("Add a .deployment file"));
    }

    #[test]
    fn project_rejects_duplicate_deployment_keys() {
        let app = TempDir::new().unwrap();
        write(app.path(), "src/proj1/project.json", "{}");
        write(app.path(), "src/proj2/project.json", "{}");
        write(
            app.path(),
            ".deployment",
            "[config]\nproject = src/proj1\nproject = src/proj2\n",
        );

        buildpack()
            .arg("project")
            .arg(app.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("must only contain one project key"));
    }

    #[test]
    fn sdk_version_for_csproj_app() {
        let root = buildpack_root();
        let app = TempDir::new().unwrap();
        write(app.path(), "src/app/app.csproj", "x");

        buildpack()
            .arg("--config")
            .arg(root.path().join("buildpack.toml"))
            .arg("sdk-version")
            .arg(app.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("sdk-version-4"))
            .stdout(predicate::str::contains("latest SDK with msbuild"));
    }

    #[test]
    fn sdk_version_honors_tooling_env() {
        let root = buildpack_root();
        let app = TempDir::new().unwrap();
        write(app.path(), "src/app/app.csproj", "x");
        write(app.path(), "src/app/project.json", "{}");

        buildpack()
            .env("DOTNET_SDK_TOOLING", "project.json")
            .env("BUILDPACK_CONFIG", root.path().join("buildpack.toml"))
            .arg("sdk-version")
            .arg(app.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("sdk-version-2"))
            .stdout(predicate::str::contains("deprecated"));
    }

    #[test]
    fn compile_missing_build_dir_fails() {
        let root = buildpack_root();
        let cache = TempDir::new().unwrap();

        buildpack()
            .arg("--config")
            .arg(root.path().join("buildpack.toml"))
            .arg("compile")
            .arg(cache.path().join("missing"))
            .arg(cache.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Path not found"));
    }

    #[test]
    fn compile_tooling_conflict_fails_with_banner() {
        let root = buildpack_root();
        write(
            root.path(),
            "buildpack.toml",
            "[buildpack]\nversion = \"1.0.9\"\n\n\
             [installers.libunwind]\nenabled = false\n\n\
             [installers.node]\nenabled = false\n\n\
             [installers.bower]\nenabled = false\n",
        );
        let app = TempDir::new().unwrap();
        let cache = TempDir::new().unwrap();
        write(app.path(), "src/app/app.csproj", "x");
        write(app.path(), "src/app/project.json", "{}");

        buildpack()
            .arg("--config")
            .arg(root.path().join("buildpack.toml"))
            .arg("compile")
            .arg(app.path())
            .arg(cache.path())
            .assert()
            .failure()
            .stdout(predicate::str::contains("ASP.NET Core buildpack version: 1.0.9"))
            .stdout(predicate::str::contains("ASP.NET Core buildpack starting compile"))
            .stdout(predicate::str::contains("-----> Scanning application for projects"))
            .stdout(predicate::str::contains("ASP.NET Core buildpack failed to compile the app"))
            .stderr(predicate::str::contains(
                "Installing .NET SDK failed, App contains both a project.json and a *.csproj file",
            ))
            .stderr(predicate::str::contains("DOTNET_SDK_TOOLING"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let root = TempDir::new().unwrap();
        write(root.path(), "buildpack.toml", "[buildpack\n");
        let app = TempDir::new().unwrap();

        buildpack()
            .arg("--config")
            .arg(root.path().join("buildpack.toml"))
            .arg("sdk-version")
            .arg(app.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
