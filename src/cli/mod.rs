//! Command-line interface.

pub mod completions;
pub mod exec;
pub mod fetch;
pub mod init;
pub mod output;
pub mod pipeline;
pub mod status;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::domain::{Action, Environment};

/// Vaultform - Run Terraform with short-lived cloud credentials from Vault.
#[derive(Parser)]
#[command(
    name = "vaultform",
    about = "Run Terraform with short-lived cloud credentials from Vault",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file
    #[arg(long, global = true, env = "VAULTFORM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Write a starter .vaultform.toml in the current directory
    Init {
        /// Vault address (e.g. https://vault.example.com:8200)
        #[arg(long)]
        address: Option<String>,
        /// KV v2 path holding access_key and secret_key
        #[arg(long)]
        secret_path: Option<String>,
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Authenticate and read credentials (prints a masked summary)
    Fetch {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a command with credentials bound to its environment
    Exec {
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Run the provisioning step sequence
    Pipeline {
        /// What to do
        #[arg(long, value_enum)]
        action: Action,
        /// Which environment
        #[arg(long = "env", value_enum)]
        environment: Environment,
        /// Print the steps without running them
        #[arg(long)]
        dry_run: bool,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
        /// Approve the production gate for this environment up front
        #[arg(long, value_enum, value_name = "ENV")]
        confirm: Option<Environment>,
    },

    /// Show resolved configuration and readiness checks
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, config: Option<&Path>) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Init {
            address,
            secret_path,
            force,
        } => init::execute(config, address, secret_path, force),
        Fetch { json } => fetch::execute(&Config::load(config)?, json),
        Exec { command } => exec::execute(&Config::load(config)?, &command),
        Pipeline {
            action,
            environment,
            dry_run,
            json,
            confirm,
        } => pipeline::execute(
            &Config::load(config)?,
            pipeline::Options {
                action,
                environment,
                dry_run,
                json,
                confirm,
            },
        ),
        Status => status::execute(config),
        Completions { shell } => completions::execute(shell),
    }
}
