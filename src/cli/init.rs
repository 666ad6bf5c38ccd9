//! Init command - write a starter configuration.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config::{self, Config};
use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Write `.vaultform.toml` (or `path`) and ignore Terraform artifacts.
pub fn execute(
    path: Option<&Path>,
    address: Option<String>,
    secret_path: Option<String>,
    force: bool,
) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);

    if path.exists() && !force {
        return Err(ConfigError::AlreadyInitialized(path.display().to_string()).into());
    }

    let mut config = Config::new();
    // --force rewrites the vault settings but keeps a readable [terraform] section
    if let Ok(existing) = Config::load_from(&path) {
        config.terraform = existing.terraform;
    }
    config.vault.address = address;
    config.vault.secret_path = secret_path;
    config.validate()?;
    config.save(&path)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    config::ensure_gitignore(dir, &config.terraform.plan_file)?;

    info!(path = %path.display(), "initialized");

    output::success(&format!("wrote {}", output::path(path.display())));
    output::kv(
        "gitignore",
        config::gitignore_entries(&config.terraform.plan_file).join(" "),
    );
    output::blank();
    if config.vault.address.is_none() {
        output::hint(&format!(
            "set vault.address or export {}",
            constants::VAULT_ADDR_ENV
        ));
    }
    if config.vault.secret_path.is_none() {
        output::hint(&format!(
            "set vault.secret_path or export {}",
            constants::VAULT_SECRET_PATH_ENV
        ));
    }
    output::hint(&format!(
        "export {} and {} before running {}",
        constants::ROLE_ID_ENV,
        constants::SECRET_ID_ENV,
        output::cmd("vaultform fetch")
    ));

    Ok(())
}
