//! Pipeline step type.

use serde::Serialize;

/// One named stage of a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Checkout,
    ToolSetup,
    Init,
    SelectWorkspace,
    FormatCheck,
    Validate,
    Plan,
    Approval,
    Apply,
    Destroy,
    Output,
}

impl Step {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Checkout => "checkout",
            Self::ToolSetup => "tool setup",
            Self::Init => "init",
            Self::SelectWorkspace => "select workspace",
            Self::FormatCheck => "format check",
            Self::Validate => "validate",
            Self::Plan => "plan",
            Self::Approval => "approval",
            Self::Apply => "apply",
            Self::Destroy => "destroy",
            Self::Output => "output",
        }
    }

    /// Whether the step talks to the state backend or the cloud provider.
    pub fn needs_credentials(&self) -> bool {
        matches!(
            self,
            Self::Init
                | Self::SelectWorkspace
                | Self::Plan
                | Self::Apply
                | Self::Destroy
                | Self::Output
        )
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
