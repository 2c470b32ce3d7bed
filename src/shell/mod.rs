//! External command execution
//!
//! Downloads, archive extraction and `dotnet restore` are all opaque shell
//! commands. They go through the [`Shell`] trait so the pipeline can be
//! driven without touching the network.

mod system;

pub use system::SystemShell;

use crate::error::BuildpackResult;
use crate::ui::Reporter;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Max number of output lines to include in command error messages.
const ERROR_TAIL_LINES: usize = 50;

/// A shell command line plus its execution context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command line passed to `bash -c`
    pub script: String,

    /// Working directory
    pub cwd: Option<PathBuf>,

    /// Variables exported before the script runs
    ///
    /// Values are expanded by the shell, so `$PATH:/extra` appends.
    pub exports: Vec<(String, String)>,
}

impl CommandSpec {
    /// Create a command from a script line
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }

    /// Run in the given directory
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Export a variable for the command
    pub fn export(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.exports.push((name.into(), value.into()));
        self
    }

    /// Full script with exports and directory change prepended
    pub fn render(&self) -> String {
        let mut rendered = String::new();
        for (name, value) in &self.exports {
            rendered.push_str(&format!(
                "export {}=\"{}\"; ",
                name,
                value.replace('\\', "\\\\").replace('"', "\\\"")
            ));
        }
        if let Some(ref dir) = self.cwd {
            rendered.push_str(&format!("cd {} && ", quote(dir)));
        }
        rendered.push_str(&self.script);
        rendered
    }
}

/// Abstract command runner
#[async_trait]
pub trait Shell: Send + Sync {
    /// Run a command to completion, relaying its output to the reporter
    ///
    /// A non-zero exit status is an error.
    async fn exec(&self, command: &CommandSpec, reporter: &dyn Reporter) -> BuildpackResult<()>;
}

/// Single-quote a path for the shell
pub fn quote(path: &Path) -> String {
    format!("'{}'", path.to_string_lossy().replace('\'', r"'\''"))
}

/// Extract the useful tail of command output for error diagnostics.
pub(crate) fn error_output(lines: &[String]) -> String {
    let start = lines.len().saturating_sub(ERROR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_escapes_single_quotes() {
        assert_eq!(quote(Path::new("/tmp/app")), "'/tmp/app'");
        assert_eq!(quote(Path::new("/tmp/it's")), r"'/tmp/it'\''s'");
    }

    #[test]
    fn render_prepends_exports_and_cd() {
        let command = CommandSpec::new("dotnet restore")
            .current_dir("/tmp/app")
            .export("HOME", "/tmp/app")
            .export("PATH", "$PATH:/tmp/app/.dotnet");

        assert_eq!(
            command.render(),
            "export HOME=\"/tmp/app\"; export PATH=\"$PATH:/tmp/app/.dotnet\"; cd '/tmp/app' && dotnet restore"
        );
    }

    #[test]
    fn error_output_keeps_tail() {
        let lines: Vec<String> = (0..60).map(|i| format!("line {}", i)).collect();
        let tail = error_output(&lines);
        assert!(tail.starts_with("line 10"));
        assert!(tail.ends_with("line 59"));
        assert_eq!(error_output(&["only".to_string()]), "only");
    }
}
