//! Manual approval gate.

use crate::core::domain::{Environment, Target};
use crate::error::Result;

/// Decides whether a gated target may proceed.
pub trait Approver {
    /// Return `Ok(true)` to let the run continue.
    ///
    /// # Errors
    ///
    /// Returns an error if no decision can be obtained (e.g. no terminal).
    fn approve(&self, target: &Target) -> Result<bool>;
}

/// Approves only the environment confirmed up front (`--confirm ENV`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PresetApprover {
    confirmed: Option<Environment>,
}

impl PresetApprover {
    pub fn new(confirmed: Option<Environment>) -> Self {
        Self { confirmed }
    }
}

impl Approver for PresetApprover {
    fn approve(&self, target: &Target) -> Result<bool> {
        Ok(self.confirmed == Some(target.environment))
    }
}
