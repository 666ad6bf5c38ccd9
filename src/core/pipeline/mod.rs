//! Provisioning step orchestration.
//!
//! Runs the steps of a [`Target`] in order. Every credentialed step fetches a
//! fresh bundle from the [`CredentialSource`] and hands it to the scoped
//! executor; nothing is cached between steps. The first failure stops the run
//! and the remaining steps are recorded as not run.

mod approval;
mod report;

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::domain::{Step, Target};
use crate::core::provisioner::Provisioner;
use crate::core::scope::ScopedExecutor;
use crate::core::vault::CredentialSource;
use crate::error::{PipelineError, Result};

pub use approval::{Approver, PresetApprover};
pub use report::{PipelineReport, StepFailure, StepRecord, StepStatus};

/// A step as it would run, for dry runs.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedStep {
    pub step: Step,
    pub credentials: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// Steps and commands for `target` without running anything.
pub fn plan(target: &Target, provisioner: &Provisioner) -> Vec<PlannedStep> {
    target
        .steps()
        .into_iter()
        .map(|step| PlannedStep {
            step,
            credentials: step.needs_credentials(),
            command: provisioner
                .command(step, target)
                .map(|command| command.to_string()),
        })
        .collect()
}

/// One provisioning run.
pub struct Pipeline<'a> {
    target: Target,
    provisioner: Provisioner,
    source: &'a dyn CredentialSource,
    approver: &'a dyn Approver,
    executor: ScopedExecutor,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        target: Target,
        provisioner: Provisioner,
        source: &'a dyn CredentialSource,
        approver: &'a dyn Approver,
    ) -> Self {
        Self {
            target,
            provisioner,
            source,
            approver,
            executor: ScopedExecutor::new(),
        }
    }

    /// Replace the executor (e.g. to mirror child output live).
    pub fn executor(mut self, executor: ScopedExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Run every step in order, stopping at the first failure.
    pub fn run(&self) -> PipelineReport {
        let steps = self.target.steps();
        let mut report = PipelineReport::start(self.target);
        info!(run = %self.target, steps = steps.len(), "pipeline started");

        for (index, step) in steps.iter().copied().enumerate() {
            info!(step = %step, "step started");
            let started = Instant::now();

            match self.run_step(step, &mut report) {
                Ok(exit_code) => {
                    debug!(step = %step, elapsed_ms = started.elapsed().as_millis() as u64, "step passed");
                    report.passed(step, started.elapsed(), exit_code);
                }
                Err(e) => {
                    warn!(step = %step, error = %e, "step failed");
                    report.failed(step, started.elapsed(), &e);
                    for rest in &steps[index + 1..] {
                        report.not_run(*rest);
                    }
                    break;
                }
            }
        }

        let report = report.finish();
        info!(run = %self.target, success = report.is_success(), "pipeline finished");
        report
    }

    fn run_step(&self, step: Step, report: &mut PipelineReport) -> Result<Option<i32>> {
        match step {
            Step::Checkout => {
                self.provisioner.check_workspace()?;
                Ok(None)
            }
            Step::ToolSetup => {
                self.provisioner.resolve_binary()?;
                self.execute(step)
            }
            Step::Approval => {
                report.approved_by = Some(self.approve()?);
                Ok(None)
            }
            _ => self.execute(step),
        }
    }

    fn approve(&self) -> Result<String> {
        if !self.approver.approve(&self.target)? {
            return Err(PipelineError::ApprovalDenied(self.target.to_string()).into());
        }
        let user = whoami::username();
        info!(run = %self.target, approved_by = %user, "approval granted");
        Ok(user)
    }

    fn execute(&self, step: Step) -> Result<Option<i32>> {
        let Some(command) = self.provisioner.command(step, &self.target) else {
            return Ok(None);
        };

        let result = if step.needs_credentials() {
            let bundle = self.source.fetch()?;
            self.executor.run_scoped(bundle, &command)?
        } else {
            self.executor.run(&command)?
        };

        Ok(Some(result.exit_code))
    }
}
