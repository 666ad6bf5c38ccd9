//! Provisioning target: what to do, and where.

use serde::Serialize;

use super::Step;

/// Provisioning action selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Produce a plan only
    Plan,
    /// Plan, then apply the saved plan
    Apply,
    /// Plan the destruction, then destroy
    Destroy,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Apply => "apply",
            Self::Destroy => "destroy",
        }
    }

    /// Whether the action changes real infrastructure.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Plan)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Self::Dev, Self::Staging, Self::Prod];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action against an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Target {
    pub action: Action,
    pub environment: Environment,
}

impl Target {
    pub fn new(action: Action, environment: Environment) -> Self {
        Self {
            action,
            environment,
        }
    }

    /// Mutating actions against production wait for a manual approval.
    pub fn requires_approval(&self) -> bool {
        self.action.is_mutating() && self.environment.is_production()
    }

    /// Ordered steps executed for this target.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = vec![
            Step::Checkout,
            Step::ToolSetup,
            Step::Init,
            Step::SelectWorkspace,
            Step::FormatCheck,
            Step::Validate,
            Step::Plan,
        ];

        match self.action {
            Action::Plan => {}
            Action::Apply => {
                if self.requires_approval() {
                    steps.push(Step::Approval);
                }
                steps.push(Step::Apply);
                steps.push(Step::Output);
            }
            Action::Destroy => {
                if self.requires_approval() {
                    steps.push(Step::Approval);
                }
                steps.push(Step::Destroy);
            }
        }

        steps
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.action, self.environment)
    }
}
