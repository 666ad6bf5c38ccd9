//! Provisioning tool invocation.
//!
//! Maps pipeline steps onto Terraform subcommands.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::TerraformConfig;
use crate::core::domain::{Action, Environment, Step, Target};
use crate::core::scope::ExternalCommand;
use crate::error::{PipelineError, Result};

/// Builds provisioning commands for one working directory.
#[derive(Debug, Clone)]
pub struct Provisioner {
    config: TerraformConfig,
}

impl Provisioner {
    pub fn from_config(config: &TerraformConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.config.binary
    }

    pub fn working_dir(&self) -> &Path {
        &self.config.working_dir
    }

    pub fn plan_file(&self) -> &str {
        &self.config.plan_file
    }

    /// Variables file for an environment, relative to the working directory.
    pub fn var_file(&self, environment: Environment) -> String {
        self.config.var_file_for(environment)
    }

    /// Locate the binary on `PATH` (or verify an explicit path).
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::ToolNotFound` if it cannot be found.
    pub fn resolve_binary(&self) -> Result<PathBuf> {
        let binary = self.binary();
        let path =
            which::which(binary).map_err(|_| PipelineError::ToolNotFound(binary.to_string()))?;
        debug!(binary, path = %path.display(), "resolved binary");
        Ok(path)
    }

    /// Verify the working directory exists and holds configuration files.
    ///
    /// Returns the number of `.tf` files found.
    pub fn check_workspace(&self) -> Result<usize> {
        let dir = self.working_dir();
        if !dir.is_dir() {
            return Err(PipelineError::MissingWorkingDir(dir.display().to_string()).into());
        }

        let count = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tf"))
            .count();

        if count == 0 {
            return Err(PipelineError::NoConfigurationFiles(dir.display().to_string()).into());
        }

        debug!(dir = %dir.display(), files = count, "workspace checked");
        Ok(count)
    }

    /// Command for a step, or `None` for steps that run no tool.
    pub fn command(&self, step: Step, target: &Target) -> Option<ExternalCommand> {
        let env = target.environment;
        let command = match step {
            Step::Checkout | Step::Approval => return None,
            Step::ToolSetup => self.base().arg("version"),
            Step::Init => self.base().args(["init", "-input=false"]),
            Step::SelectWorkspace => {
                self.base()
                    .args(["workspace", "select", "-or-create=true", env.as_str()])
            }
            Step::FormatCheck => self.base().args(["fmt", "-check", "-recursive"]),
            Step::Validate => self.base().arg("validate"),
            Step::Plan => {
                let mut command = self.base().args(["plan", "-input=false"]);
                if target.action == Action::Destroy {
                    command = command.arg("-destroy");
                }
                command
                    .arg(format!("-var-file={}", self.var_file(env)))
                    .arg(format!("-out={}", self.plan_file()))
            }
            Step::Apply => self
                .base()
                .args(["apply", "-input=false", "-auto-approve"])
                .arg(self.plan_file()),
            Step::Destroy => self
                .base()
                .args(["destroy", "-input=false", "-auto-approve"])
                .arg(format!("-var-file={}", self.var_file(env))),
            Step::Output => self.base().arg("output"),
        };
        Some(command)
    }

    fn base(&self) -> ExternalCommand {
        ExternalCommand::new(self.binary())
            .current_dir(self.working_dir())
            .env("TF_IN_AUTOMATION", "1")
            .env("TF_INPUT", "0")
    }
}
