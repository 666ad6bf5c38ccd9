//! Exec command.
//!
//! Fetches credentials and runs a command with them bound to its environment.
//! The child's output is mirrored live and its exit code becomes ours.

use tracing::debug;

use crate::cli::fetch::fetcher;
use crate::core::config::Config;
use crate::core::scope::{ExternalCommand, ScopedExecutor};
use crate::core::vault::CredentialSource;
use crate::error::{Error, ExecError, Result};

/// Run `command` inside a credential scope.
pub fn execute(config: &Config, command: &[String]) -> Result<()> {
    let command = ExternalCommand::from_argv(command)?;
    let fetcher = fetcher(config)?;
    let bundle = fetcher.fetch()?;

    match ScopedExecutor::new().echo(true).run_scoped(bundle, &command) {
        Ok(result) => {
            debug!(exit_code = result.exit_code, "command succeeded");
            Ok(())
        }
        // The child already reported its failure on our stdout/stderr.
        Err(Error::Exec(ExecError::CommandFailed { exit_code, .. })) => {
            std::process::exit(exit_code)
        }
        Err(e) => Err(e),
    }
}
