//! Dependency download and extraction
//!
//! Archives are fetched by the buildpack's download helper, which takes an
//! archive name and a destination directory, then unpacked with `tar`.

use crate::error::BuildpackResult;
use crate::shell::{quote, CommandSpec, Shell};
use crate::ui::Reporter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Fetches named archives and unpacks them
#[derive(Clone)]
pub struct Fetcher {
    shell: Arc<dyn Shell>,
    download_command: PathBuf,
    download_dir: PathBuf,
}

impl Fetcher {
    /// Create a fetcher running `download_command` through `shell`
    pub fn new(
        shell: Arc<dyn Shell>,
        download_command: impl Into<PathBuf>,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            shell,
            download_command: download_command.into(),
            download_dir: download_dir.into(),
        }
    }

    /// The shell commands run through
    pub fn shell(&self) -> &dyn Shell {
        self.shell.as_ref()
    }

    /// Download `archive` and unpack it into `dest`
    pub async fn fetch_and_extract(
        &self,
        archive: &str,
        dest: &Path,
        strip_components: u32,
        reporter: &dyn Reporter,
    ) -> BuildpackResult<()> {
        info!("Fetching {} into {}", archive, dest.display());

        self.shell
            .exec(&self.download_spec(archive), reporter)
            .await?;
        self.shell
            .exec(&self.extract_spec(archive, dest, strip_components), reporter)
            .await
    }

    fn download_spec(&self, archive: &str) -> CommandSpec {
        CommandSpec::new(format!(
            "{} {} {}",
            quote(&self.download_command),
            archive,
            quote(&self.download_dir)
        ))
    }

    fn extract_spec(&self, archive: &str, dest: &Path, strip_components: u32) -> CommandSpec {
        let mut script = format!(
            "mkdir -p {dest}; tar xzf {archive} -C {dest}",
            dest = quote(dest),
            archive = quote(&self.download_dir.join(archive)),
        );
        if strip_components > 0 {
            script.push_str(&format!(" --strip-components {}", strip_components));
        }
        CommandSpec::new(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::SystemShell;

    fn fetcher() -> Fetcher {
        Fetcher::new(
            Arc::new(SystemShell::new()),
            "/buildpack/compile-extensions/bin/download_dependency",
            "/tmp",
        )
    }

    #[test]
    fn download_command_line() {
        let spec = fetcher().download_spec("dotnet.sdk-version-4.linux-amd64.tar.gz");
        assert_eq!(
            spec.script,
            "'/buildpack/compile-extensions/bin/download_dependency' dotnet.sdk-version-4.linux-amd64.tar.gz '/tmp'"
        );
    }

    #[test]
    fn extract_command_line() {
        let spec = fetcher().extract_spec("libunwind-1.2.tar.gz", Path::new("/app/libunwind"), 0);
        assert_eq!(
            spec.script,
            "mkdir -p '/app/libunwind'; tar xzf '/tmp/libunwind-1.2.tar.gz' -C '/app/libunwind'"
        );

        let spec = fetcher().extract_spec("node-v6.9-linux-x64.tar.gz", Path::new("/app/.node"), 1);
        assert!(spec.script.ends_with(" --strip-components 1"));
    }
}
