//! Progress sink used by the compile pipeline
//!
//! Resolution and installers talk to a [`Reporter`] instead of printing, so
//! the same code drives the staging log and test assertions.

use super::context::UiContext;
use super::output;
use crate::pipeline::StepOutcome;
use std::sync::{Mutex, MutexGuard};

/// Receives user-facing progress from the pipeline
pub trait Reporter: Send + Sync {
    /// A step is about to run
    fn step_started(&self, description: &str);

    /// A step finished
    fn step_finished(&self, description: &str, outcome: &StepOutcome);

    /// Informational notice
    fn info(&self, message: &str);

    /// Non-fatal warning
    fn warn(&self, message: &str);

    /// One line of output from an external command
    fn output(&self, line: &str);
}

/// Reporter writing to the terminal or staging log
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    ctx: UiContext,
}

impl ConsoleReporter {
    /// Create a reporter for the given UI context
    pub fn new(ctx: UiContext) -> Self {
        Self { ctx }
    }
}

impl Reporter for ConsoleReporter {
    fn step_started(&self, description: &str) {
        output::step_start(&self.ctx, description);
    }

    fn step_finished(&self, description: &str, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::Succeeded => output::step_ok(&self.ctx, "OK"),
            StepOutcome::Failed(message) => {
                output::step_error_detail(&self.ctx, description, message)
            }
        }
    }

    fn info(&self, message: &str) {
        output::step_info(&self.ctx, message);
    }

    fn warn(&self, message: &str) {
        output::step_warn(&self.ctx, message);
    }

    fn output(&self, line: &str) {
        output::command_output(&self.ctx, line);
    }
}

/// Something a [`RecordingReporter`] captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    StepStarted(String),
    StepFinished(String, StepOutcome),
    Info(String),
    Warn(String),
    Output(String),
}

/// Reporter that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl RecordingReporter {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ReportEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, event: ReportEvent) {
        self.lock().push(event);
    }

    /// All events in order
    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// Warning messages in order
    pub fn warnings(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Warn(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    /// Informational messages in order
    pub fn infos(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Info(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    /// Descriptions of the steps that were started
    pub fn steps(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::StepStarted(d) => Some(d.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn step_started(&self, description: &str) {
        self.push(ReportEvent::StepStarted(description.to_string()));
    }

    fn step_finished(&self, description: &str, outcome: &StepOutcome) {
        self.push(ReportEvent::StepFinished(
            description.to_string(),
            outcome.clone(),
        ));
    }

    fn info(&self, message: &str) {
        self.push(ReportEvent::Info(message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.push(ReportEvent::Warn(message.to_string()));
    }

    fn output(&self, line: &str) {
        self.push(ReportEvent::Output(line.to_string()));
    }
}
