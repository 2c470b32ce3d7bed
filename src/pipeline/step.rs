//! Reported pipeline steps
//!
//! Every step announces itself, runs, and reports an outcome. A failed
//! step turns its error into [`BuildpackError::StepFailed`] so the caller
//! can stop with `?`.

use crate::error::{BuildpackError, BuildpackResult};
use crate::ui::Reporter;
use std::future::Future;
use tracing::{debug, warn};

/// How a step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed(String),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// A step that ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// Step description
    pub description: String,

    /// How it ended
    pub outcome: StepOutcome,
}

/// Runs steps against a reporter and keeps their records
pub struct StepRunner<'a> {
    reporter: &'a dyn Reporter,
    records: Vec<StepRecord>,
}

impl<'a> StepRunner<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self {
            reporter,
            records: Vec::new(),
        }
    }

    /// Run `action` as a step named `description`
    pub async fn run<T, F>(&mut self, description: &str, action: F) -> BuildpackResult<T>
    where
        F: Future<Output = BuildpackResult<T>>,
    {
        debug!("Step started: {}", description);
        self.reporter.step_started(description);
        let result = action.await;
        self.finish(description, result)
    }

    /// Turn a failed gate check into a failed step
    ///
    /// Gates decide whether a step runs at all. Their success is not
    /// reported.
    pub fn guard<T>(&mut self, description: &str, result: BuildpackResult<T>) -> BuildpackResult<T> {
        if result.is_err() {
            self.reporter.step_started(description);
            return self.finish(description, result);
        }
        result
    }

    fn finish<T>(&mut self, description: &str, result: BuildpackResult<T>) -> BuildpackResult<T> {
        let outcome = match result {
            Ok(_) => StepOutcome::Succeeded,
            Err(ref e) => StepOutcome::Failed(e.to_string()),
        };
        self.reporter.step_finished(description, &outcome);
        self.records.push(StepRecord {
            description: description.to_string(),
            outcome,
        });

        result.map_err(|e| {
            warn!("Step failed: {}: {}", description, e);
            BuildpackError::step_failed(description, e)
        })
    }

    /// Steps run so far
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StepRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{RecordingReporter, ReportEvent};

    #[tokio::test]
    async fn successful_step_is_recorded() {
        let reporter = RecordingReporter::new();
        let mut steps = StepRunner::new(&reporter);

        let value = steps.run("Restoring files from buildpack cache", async { Ok(7) }).await;
        assert_eq!(value.unwrap(), 7);
        assert_eq!(
            steps.records(),
            &[StepRecord {
                description: "Restoring files from buildpack cache".to_string(),
                outcome: StepOutcome::Succeeded,
            }]
        );
        assert_eq!(
            reporter.events(),
            vec![
                ReportEvent::StepStarted("Restoring files from buildpack cache".to_string()),
                ReportEvent::StepFinished(
                    "Restoring files from buildpack cache".to_string(),
                    StepOutcome::Succeeded
                ),
            ]
        );
    }

    #[tokio::test]
    async fn failed_step_prefixes_description() {
        let reporter = RecordingReporter::new();
        let mut steps = StepRunner::new(&reporter);

        let err = steps
            .run("Installing .NET SDK", async {
                Err::<(), _>(BuildpackError::PathNotFound("/tmp/boom".into()))
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Installing .NET SDK failed, Path not found: /tmp/boom");
        assert_eq!(
            steps.into_records()[0].outcome,
            StepOutcome::Failed("Path not found: /tmp/boom".to_string())
        );
    }

    #[test]
    fn guard_reports_only_failures() {
        let reporter = RecordingReporter::new();
        let mut steps = StepRunner::new(&reporter);

        assert!(steps.guard("Installing Bower", Ok(true)).unwrap());
        assert!(reporter.events().is_empty());

        let err = steps
            .guard::<bool>("Installing Bower", Err(BuildpackError::ToolingConflict))
            .unwrap_err();
        assert!(matches!(err, BuildpackError::StepFailed { .. }));
        assert_eq!(reporter.steps(), vec!["Installing Bower"]);
        assert!(!steps.records()[0].outcome.is_success());
    }
}
