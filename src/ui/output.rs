//! Output functions for consistent staging log formatting
//!
//! Plain mode follows the buildpack log convention: `-----> ` for steps and
//! a seven-space indent for everything printed under them.

use super::context::UiContext;
use console::style;

const STEP_ARROW: &str = "----->";
const INDENT: &str = "       ";

/// Display intro banner
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{}", title);
    }
}

/// Display success outro
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(message).green().bold()).ok();
    } else {
        println!("{}", message);
    }
}

/// Display error outro
pub fn outro_error(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(message).red().bold()).ok();
    } else {
        println!("{} {}", style("[ERROR]").red(), message);
    }
}

/// Display the start of a pipeline step
pub fn step_start(ctx: &UiContext, description: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::step(style(description).bold()).ok();
    } else {
        println!("{} {}", STEP_ARROW, description);
    }
}

/// Display a success step
pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(message).ok();
    } else {
        println!("{}{} {}", INDENT, style("[OK]").green(), message);
    }
}

/// Display an error step with detail
pub fn step_error_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::error(format!("{}: {}", message, style(detail).red())).ok();
    } else {
        println!("{}{} {}: {}", INDENT, style("[FAIL]").red(), message, detail);
    }
}

/// Display a warning
pub fn step_warn(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(message).ok();
    } else {
        for line in message.lines() {
            println!("{}{} {}", INDENT, style("[WARN]").yellow(), line);
        }
    }
}

/// Display an informational line under the current step
pub fn step_info(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::info(message).ok();
    } else {
        for line in message.lines() {
            println!("{}{}", INDENT, line);
        }
    }
}

/// Relay one line of external command output
pub fn command_output(ctx: &UiContext, line: &str) {
    if ctx.use_fancy_output() {
        println!("  {}", style(line).dim());
    } else {
        println!("{}{}", INDENT, line);
    }
}

/// Print a key-value pair
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.use_fancy_output() {
        println!("  {}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
