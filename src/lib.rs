//! Vaultform - Run Terraform with short-lived cloud credentials from Vault.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Write .vaultform.toml
//! │   ├── fetch         # Authenticate and read credentials
//! │   ├── exec          # Run a command with credentials bound
//! │   ├── pipeline      # Run the provisioning steps
//! │   ├── status        # Configuration and readiness overview
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .vaultform.toml management
//!     ├── domain/       # Identity, credentials, targets, steps
//!     ├── vault/        # AppRole login and KV v2 reads
//!     ├── scope         # Scoped env overlay and command execution
//!     ├── provisioner   # Terraform command construction
//!     └── pipeline/     # Step orchestration, approval, reports
//! ```
//!
//! # Features
//!
//! - AppRole authentication with a token that never outlives the read
//! - Credentials bound to one child process, never to the parent environment
//! - Secret material wiped from memory on drop
//! - Plan/apply/destroy sequencing with a production approval gate

pub mod cli;
pub mod core;
pub mod error;
