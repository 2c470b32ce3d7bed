//! UI module for buildpack output
//!
//! Uses `cliclack` log lines when run from an interactive terminal and
//! falls back to the plain `-----> ` staging log format otherwise.
//!
//! # Example
//!
//! ```rust,ignore
//! use dotnet_buildpack::ui::{self, ConsoleReporter, Reporter, UiContext};
//!
//! let ctx = UiContext::detect();
//! ui::intro(&ctx, "ASP.NET Core buildpack starting compile");
//!
//! let reporter = ConsoleReporter::new(ctx.clone());
//! reporter.step_started("Restoring files from buildpack cache");
//! reporter.warn("File /tmp/app/global.json is not valid JSON");
//! ```

mod context;
mod output;
mod reporter;
mod theme;

pub use context::{OutputMode, UiContext};
pub use output::{
    command_output, intro, key_value, outro_error, outro_success, step_error_detail, step_info,
    step_ok, step_start, step_warn,
};
pub use reporter::{ConsoleReporter, RecordingReporter, ReportEvent, Reporter};
pub use theme::{init_theme, BuildpackTheme};
