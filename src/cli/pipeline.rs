//! Pipeline command.
//!
//! Runs the provisioning steps for an action and environment, asking for
//! approval on the production gate.

use std::io::{self, IsTerminal};

use dialoguer::Input;
use tracing::info;

use crate::cli::fetch::fetcher;
use crate::cli::output;
use crate::core::config::Config;
use crate::core::domain::{Action, Environment, Target};
use crate::core::pipeline::{
    self, Approver, Pipeline, PipelineReport, PresetApprover, StepStatus,
};
use crate::core::provisioner::Provisioner;
use crate::core::scope::ScopedExecutor;
use crate::error::{PipelineError, Result};

/// Flags for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub action: Action,
    pub environment: Environment,
    pub dry_run: bool,
    pub json: bool,
    pub confirm: Option<Environment>,
}

/// Asks on the terminal; the operator must type the environment name.
struct TerminalApprover;

impl Approver for TerminalApprover {
    fn approve(&self, target: &Target) -> Result<bool> {
        if !io::stdin().is_terminal() {
            return Err(
                PipelineError::ApprovalUnavailable(target.environment.to_string()).into(),
            );
        }

        // Prompt goes to stderr so stdout stays clean for --json.
        let answer: String = Input::new()
            .with_prompt(format!(
                "About to {}. Type '{}' to approve",
                target,
                target.environment.as_str()
            ))
            .allow_empty(true)
            .interact_text()?;

        Ok(answer.trim() == target.environment.as_str())
    }
}

/// Run (or with `--dry-run`, describe) the pipeline.
pub fn execute(config: &Config, options: Options) -> Result<()> {
    let target = Target::new(options.action, options.environment);
    let provisioner = Provisioner::from_config(&config.terraform);

    if options.dry_run {
        return dry_run(&target, &provisioner, options.json);
    }

    let source = fetcher(config)?;
    let approver: Box<dyn Approver> = match options.confirm {
        Some(env) => Box::new(PresetApprover::new(Some(env))),
        None => Box::new(TerminalApprover),
    };

    info!(run = %target, "running pipeline");
    let report = Pipeline::new(target, provisioner, &source, approver.as_ref())
        .executor(ScopedExecutor::new().echo(!options.json))
        .run();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    report.into_result().map(|_| ())
}

fn dry_run(target: &Target, provisioner: &Provisioner, json: bool) -> Result<()> {
    let planned = pipeline::plan(target, provisioner);

    if json {
        println!("{}", serde_json::to_string_pretty(&planned)?);
        return Ok(());
    }

    output::section(&format!("{} (dry run)", target));
    for step in &planned {
        let detail = match &step.command {
            Some(command) => output::cmd(command),
            None => output::skip("(no command)"),
        };
        let marker = if step.credentials { "*" } else { " " };
        println!("  {} {:<16} {}", marker, step.step.name(), detail);
    }
    output::blank();
    output::dimmed("* runs with freshly fetched credentials");

    Ok(())
}

fn print_report(report: &PipelineReport) {
    output::section(&report.target.to_string());

    for record in &report.steps {
        let name = format!("{:<16}", record.step.name());
        let (marker, name) = match record.status {
            StepStatus::Passed => (output::ok("✓"), name),
            StepStatus::Failed => (output::fail("✗"), output::fail(&name)),
            StepStatus::NotRun => (output::skip("-"), output::skip(&name)),
        };
        let timing = match record.status {
            StepStatus::NotRun => String::new(),
            _ => output::skip(&format!("{}ms", record.duration_ms)),
        };
        println!("  {} {} {}", marker, name, timing);
    }

    output::blank();
    if let Some(user) = &report.approved_by {
        output::kv("approved by", user);
    }
    let passed = report.count(StepStatus::Passed);
    if report.is_success() {
        output::success(&format!("{} steps passed", passed));
    } else {
        output::kv(
            "summary",
            format!(
                "{} passed, {} failed, {} not run",
                passed,
                report.count(StepStatus::Failed),
                report.count(StepStatus::NotRun)
            ),
        );
    }
}
