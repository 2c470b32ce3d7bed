//! Where compile output ends up

use std::io::IsTerminal;

/// Variables present in every staging container
const STAGING_VARS: [&str; 3] = ["CF_STACK", "VCAP_APPLICATION", "CF_INSTANCE_GUID"];

/// Output destination of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// A developer running the buildpack by hand in a terminal
    Terminal,
    /// Staging log stream, read by `cf push` and the log aggregator
    Staging,
    /// Any other pipe, CI included
    Plain,
}

/// Decides how output is rendered
#[derive(Debug, Clone)]
pub struct UiContext {
    mode: OutputMode,
}

impl UiContext {
    /// Detect the mode from stdout and the environment
    pub fn detect() -> Self {
        let staging = STAGING_VARS.iter().any(|var| std::env::var_os(var).is_some());
        let terminal = std::io::stdout().is_terminal() && std::env::var_os("CI").is_none();
        Self::with_mode(classify(terminal, staging))
    }

    /// Plain context for tests and piped output
    pub fn non_interactive() -> Self {
        Self::with_mode(OutputMode::Plain)
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == OutputMode::Terminal
    }

    /// Colors and cliclack lines; staging logs always get `----->` lines
    pub fn use_fancy_output(&self) -> bool {
        self.is_interactive()
    }
}

fn classify(terminal: bool, staging: bool) -> OutputMode {
    if staging {
        OutputMode::Staging
    } else if terminal {
        OutputMode::Terminal
    } else {
        OutputMode::Plain
    }
}
