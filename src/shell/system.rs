//! Shell implementation backed by `bash`

use super::{error_output, CommandSpec, Shell};
use crate::error::{BuildpackError, BuildpackResult};
use crate::ui::Reporter;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::debug;

/// Runs commands through `bash -c`, streaming output to the reporter
#[derive(Debug, Clone)]
pub struct SystemShell {
    program: String,
}

impl SystemShell {
    /// Create a shell using `bash`
    pub fn new() -> Self {
        Self {
            program: "bash".to_string(),
        }
    }

    /// Create a shell using a different interpreter (must accept `-c`)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream stdout+stderr from a child process into the reporter.
///
/// Returns all collected output lines for error reporting.
async fn stream_child_output(child: &mut Child, reporter: &dyn Reporter) -> Vec<String> {
    let mut all_output = Vec::new();
    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return all_output;
    };

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let mut stdout_done = false;
    let mut stderr_done = false;

    while !stdout_done || !stderr_done {
        tokio::select! {
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(line)) => {
                        reporter.output(&line);
                        all_output.push(line);
                    }
                    _ => stdout_done = true,
                }
            }
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => {
                        reporter.output(&line);
                        all_output.push(line);
                    }
                    _ => stderr_done = true,
                }
            }
        }
    }

    all_output
}

#[async_trait]
impl Shell for SystemShell {
    async fn exec(&self, command: &CommandSpec, reporter: &dyn Reporter) -> BuildpackResult<()> {
        let script = command.render();
        debug!("Executing: {} -c {:?}", self.program, script);

        let mut child = Command::new(&self.program)
            .arg("-c")
            .arg(&script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BuildpackError::command_failed(&command.script, e))?;

        let output = stream_child_output(&mut child, reporter).await;

        let status = child
            .wait()
            .await
            .map_err(|e| BuildpackError::command_failed(&command.script, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildpackError::CommandExit {
                command: command.script.clone(),
                code: status.code().unwrap_or(-1),
                output: error_output(&output),
            })
        }
    }
}
