//! Run report.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::domain::{Step, Target};
use crate::error::{Error, ExecError, PipelineError};

/// Outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Passed,
    Failed,
    NotRun,
}

/// One line of the report.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: Step,
    pub status: StepStatus,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

/// Why the run stopped.
#[derive(Debug, Clone, Serialize)]
pub struct StepFailure {
    pub step: Step,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Captured output of the failed command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Record of a pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub target: Target,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub steps: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StepFailure>,
}

impl PipelineReport {
    pub(super) fn start(target: Target) -> Self {
        Self {
            target,
            started_at: Utc::now(),
            finished_at: None,
            steps: Vec::new(),
            approved_by: None,
            failure: None,
        }
    }

    pub(super) fn passed(&mut self, step: Step, elapsed: Duration, exit_code: Option<i32>) {
        self.steps.push(StepRecord {
            step,
            status: StepStatus::Passed,
            duration_ms: millis(elapsed),
            exit_code,
        });
    }

    pub(super) fn failed(&mut self, step: Step, elapsed: Duration, error: &Error) {
        let (exit_code, output) = match error {
            Error::Exec(ExecError::CommandFailed {
                exit_code, output, ..
            }) => (Some(*exit_code), Some(output.clone())),
            _ => (None, None),
        };

        self.steps.push(StepRecord {
            step,
            status: StepStatus::Failed,
            duration_ms: millis(elapsed),
            exit_code,
        });
        self.failure = Some(StepFailure {
            step,
            message: error.to_string(),
            exit_code,
            output,
        });
    }

    pub(super) fn not_run(&mut self, step: Step) {
        self.steps.push(StepRecord {
            step,
            status: StepStatus::NotRun,
            duration_ms: 0,
            exit_code: None,
        });
    }

    pub(super) fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Steps with the given status.
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|r| r.status == status).count()
    }

    /// Status recorded for a step, if it was part of the run.
    pub fn status_of(&self, step: Step) -> Option<StepStatus> {
        self.steps.iter().find(|r| r.step == step).map(|r| r.status)
    }

    /// Convert a failed run into the error the process should exit with.
    pub fn into_result(self) -> crate::error::Result<Self> {
        match &self.failure {
            None => Ok(self),
            Some(failure) => Err(PipelineError::StepFailed {
                step: failure.step.name().to_string(),
                message: failure.message.clone(),
                exit_code: failure.exit_code.filter(|c| *c != 0).unwrap_or(1),
            }
            .into()),
        }
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
