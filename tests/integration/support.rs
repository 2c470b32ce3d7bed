//! Shared fixtures for pipeline tests

use async_trait::async_trait;
use dotnet_buildpack::config::BuildEnv;
use dotnet_buildpack::installer::{create_installers, Fetcher, InstallContext};
use dotnet_buildpack::pipeline::{CompileReport, Compiler};
use dotnet_buildpack::sdk::SdkManifest;
use dotnet_buildpack::shell::{CommandSpec, Shell};
use dotnet_buildpack::ui::{RecordingReporter, Reporter};
use dotnet_buildpack::{BuildpackError, BuildpackResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const MANIFEST_YML: &str = r#"---
default_versions:
- name: dotnet
  version: sdk-version-2
dependencies:
- name: dotnet
  version: sdk-version-2
- name: dotnet
  version: sdk-version-3
- name: dotnet
  version: sdk-version-4
- name: libunwind
  version: 1.2
- name: node
  version: 6.9.1
- name: bower
  version: 1.8.0
"#;

pub const TOOLS_YML: &str = r#"---
project_json:
- sdk-version-2
msbuild:
- sdk-version-3
- sdk-version-4
"#;

/// Framework version `dotnet restore` pretends to pull in
pub const RESTORED_FRAMEWORK: &str = "1.1.0";

/// Stand-in for the download helper, `tar` and `dotnet`
///
/// Extraction creates the target directory, framework archives add their
/// shared runtime, and `dotnet restore` drops a NuGet package for
/// [`RESTORED_FRAMEWORK`].
#[derive(Default)]
pub struct FakeShell {
    commands: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl FakeShell {
    pub fn failing_on(pattern: &str) -> Self {
        Self {
            fail_on: Some(pattern.to_string()),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|c| c.contains("download_dependency"))
            .collect()
    }

    fn extract(script: &str) {
        let dest = PathBuf::from(quoted_after(script, "-C ").expect("extract destination"));
        if dest.is_file() {
            fs::remove_file(&dest).unwrap();
        }
        fs::create_dir_all(&dest).unwrap();

        if let Some(rest) = script.split("dotnet-framework.").nth(1) {
            let version = rest.split(".linux-amd64").next().unwrap();
            fs::create_dir_all(dest.join("shared/Microsoft.NETCore.App").join(version)).unwrap();
        }
    }

    fn restore(cwd: &Path) {
        fs::create_dir_all(
            cwd.join(".nuget/packages/microsoft.netcore.app")
                .join(RESTORED_FRAMEWORK),
        )
        .unwrap();
    }
}

fn quoted_after<'a>(script: &'a str, marker: &str) -> Option<&'a str> {
    let start = script.find(marker)? + marker.len() + 1;
    let len = script[start..].find('\'')?;
    Some(&script[start..start + len])
}

#[async_trait]
impl Shell for FakeShell {
    async fn exec(&self, command: &CommandSpec, reporter: &dyn Reporter) -> BuildpackResult<()> {
        let rendered = command.render();
        self.commands.lock().unwrap().push(rendered.clone());
        reporter.output(&command.script);

        if let Some(ref pattern) = self.fail_on {
            if rendered.contains(pattern.as_str()) {
                return Err(BuildpackError::CommandExit {
                    command: rendered,
                    code: 1,
                    output: "simulated failure".to_string(),
                });
            }
        }

        if command.script.contains("tar xzf") {
            Self::extract(&command.script);
        } else if command.script.starts_with("dotnet restore") {
            if let Some(ref cwd) = command.cwd {
                Self::restore(cwd);
            }
        }
        Ok(())
    }
}

/// Write `content` to `root/relative`, creating parents
pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A build dir and cache dir pair
pub struct Staging {
    pub build: TempDir,
    pub cache: TempDir,
}

impl Staging {
    pub fn new() -> Self {
        Self {
            build: TempDir::new().unwrap(),
            cache: TempDir::new().unwrap(),
        }
    }

    /// Fresh build dir sharing this cache
    pub fn next_build(self) -> Self {
        Self {
            build: TempDir::new().unwrap(),
            cache: self.cache,
        }
    }

    pub fn build_path(&self, relative: &str) -> PathBuf {
        self.build.path().join(relative)
    }

    pub fn cache_path(&self, relative: &str) -> PathBuf {
        self.cache.path().join(relative)
    }
}

/// Run a full compile with default installers
pub async fn compile(
    staging: &Staging,
    env: BuildEnv,
    shell: Arc<FakeShell>,
) -> (CompileReport, RecordingReporter) {
    let ctx = InstallContext {
        build_dir: staging.build.path().to_path_buf(),
        cache_dir: staging.cache.path().to_path_buf(),
        manifest: Arc::new(SdkManifest::parse(MANIFEST_YML, TOOLS_YML).unwrap()),
        env,
        fetcher: Fetcher::new(shell, "/buildpack/compile-extensions/bin/download_dependency", "/tmp"),
    };
    let installers = create_installers(&Default::default(), &ctx);

    let reporter = RecordingReporter::new();
    let report = Compiler::new(&ctx, installers).compile(&reporter).await;
    (report, reporter)
}
