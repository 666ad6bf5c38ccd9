//! Vaultform - Run Terraform with short-lived cloud credentials from Vault.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vaultform::cli::output;
use vaultform::cli::{execute, Cli};
use vaultform::core::constants;
use vaultform::error::{ConfigError, Error, FetchError, PipelineError, ValidationError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("vaultform=debug")
        } else {
            EnvFilter::new("vaultform=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.config.as_deref()) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingField { env, .. }) => {
                Some(format!("export {}=... or run: vaultform init", env))
            }
            Error::Config(ConfigError::AlreadyInitialized(_)) => {
                Some("run: vaultform init --force".to_string())
            }
            Error::Validation(ValidationError::EmptyIdentityField(_)) => Some(format!(
                "export {} and {}",
                constants::ROLE_ID_ENV,
                constants::SECRET_ID_ENV
            )),
            Error::Fetch(FetchError::Unreachable { .. }) => {
                Some(format!("check {} and network access", constants::VAULT_ADDR_ENV))
            }
            Error::Pipeline(PipelineError::ToolNotFound(_)) => {
                Some("install terraform or set terraform.binary".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(e.exit_code());
    }
}
