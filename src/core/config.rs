//! Configuration file management.
//!
//! Handles reading, writing, and validating `.vaultform.toml`, and resolving
//! the Vault settings against environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::constants;
use crate::core::domain::{Environment, SecretPath};
use crate::core::vault;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.vaultform.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Secrets store connection
    #[serde(default)]
    pub vault: VaultConfig,
    /// Provisioning tool invocation
    #[serde(default)]
    pub terraform: TerraformConfig,
}

/// `[vault]` section.
///
/// Identity values are never read from here; they come from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Base URL, e.g. `https://vault.example.com:8200`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// KV v2 path holding `access_key` and `secret_key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_path: Option<String>,
    /// AppRole auth mount
    #[serde(default = "default_auth_mount")]
    pub auth_mount: String,
    /// Vault Enterprise namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// `[terraform]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerraformConfig {
    /// Provisioning binary name or path
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Directory holding the `.tf` configuration
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,
    /// Variables file template, relative to `working_dir`
    #[serde(default = "default_var_file")]
    pub var_file: String,
    /// Saved plan file, relative to `working_dir`
    #[serde(default = "default_plan_file")]
    pub plan_file: String,
}

fn default_auth_mount() -> String {
    constants::DEFAULT_AUTH_MOUNT.to_string()
}

fn default_timeout_secs() -> u64 {
    constants::DEFAULT_TIMEOUT_SECS
}

fn default_binary() -> String {
    constants::DEFAULT_BINARY.to_string()
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_var_file() -> String {
    constants::DEFAULT_VAR_FILE.to_string()
}

fn default_plan_file() -> String {
    constants::DEFAULT_PLAN_FILE.to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            address: None,
            secret_path: None,
            auth_mount: default_auth_mount(),
            namespace: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            working_dir: default_working_dir(),
            var_file: default_var_file(),
            plan_file: default_plan_file(),
        }
    }
}

impl TerraformConfig {
    /// Variables file for an environment, relative to `working_dir`.
    pub fn var_file_for(&self, environment: Environment) -> String {
        self.var_file
            .replace(constants::ENV_PLACEHOLDER, environment.as_str())
    }
}

/// Vault settings after applying environment overrides.
#[derive(Debug, Clone)]
pub struct VaultSettings {
    pub address: String,
    pub secret_path: SecretPath,
    pub auth_mount: String,
    pub namespace: Option<String>,
    pub timeout: Duration,
}

impl Config {
    /// Create a configuration with every default applied
    pub fn new() -> Self {
        Self::default()
    }

    /// Path to the configuration file in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `.vaultform.toml` in the
    /// current directory is used when present, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if an explicit path cannot be read,
    /// `ConfigError::Parse` if the TOML is malformed, or a validation error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::new())
                }
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            address = config.vault.address.as_deref().unwrap_or("-"),
            binary = %config.terraform.binary,
            "config loaded"
        );

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate the configuration structure and contents
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        if self.vault.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "vault.timeout_secs",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }

        if self.vault.auth_mount.trim_matches('/').is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "vault.auth_mount",
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if let Some(address) = &self.vault.address {
            vault::validate_endpoint(address)?;
        }

        if let Some(path) = &self.vault.secret_path {
            SecretPath::parse(path)?;
        }

        let terraform = [
            ("terraform.binary", &self.terraform.binary),
            ("terraform.var_file", &self.terraform.var_file),
            ("terraform.plan_file", &self.terraform.plan_file),
        ];
        for (field, value) in terraform {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Resolve Vault settings, letting process environment variables win.
    pub fn resolve_vault(&self) -> Result<VaultSettings> {
        self.resolve_vault_with(|name| std::env::var(name).ok())
    }

    /// Resolve Vault settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if no address or secret path is
    /// configured anywhere.
    pub fn resolve_vault_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<VaultSettings> {
        let pick = |env: &str, file: &Option<String>| {
            lookup(env)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file.clone())
        };

        let address = pick(constants::VAULT_ADDR_ENV, &self.vault.address).ok_or(
            ConfigError::MissingField {
                field: "vault.address",
                env: constants::VAULT_ADDR_ENV,
            },
        )?;

        let secret_path = pick(constants::VAULT_SECRET_PATH_ENV, &self.vault.secret_path)
            .ok_or(ConfigError::MissingField {
                field: "vault.secret_path",
                env: constants::VAULT_SECRET_PATH_ENV,
            })?;

        let namespace = pick(constants::VAULT_NAMESPACE_ENV, &self.vault.namespace);

        let secret_path = SecretPath::parse(&secret_path)?;
        if !secret_path.is_versioned() {
            warn!(path = %secret_path, "secret path has no /data/ segment; KV v2 reads will likely 404");
        }

        Ok(VaultSettings {
            address,
            secret_path,
            auth_mount: self.vault.auth_mount.trim_matches('/').to_string(),
            namespace,
            timeout: Duration::from_secs(self.vault.timeout_secs),
        })
    }
}

/// Gitignore entries for a project writing its plan to `plan_file`.
pub fn gitignore_entries(plan_file: &str) -> Vec<&str> {
    let mut entries: Vec<&str> = constants::GITIGNORE_ENTRIES.to_vec();
    let plan_file = plan_file.trim();
    if !plan_file.is_empty() && !entries.contains(&plan_file) {
        entries.push(plan_file);
    }
    entries
}

/// Ensure `.gitignore` in `dir` ignores Terraform state and the plan file
///
/// # Errors
///
/// Returns error if file operations fail.
pub fn ensure_gitignore(dir: &Path, plan_file: &str) -> Result<()> {
    let gitignore = dir.join(".gitignore");

    let existing = if gitignore.exists() {
        std::fs::read_to_string(&gitignore)?
    } else {
        String::new()
    };

    let mut updated = existing.clone();
    for entry in gitignore_entries(plan_file) {
        if !existing.lines().any(|l| l.trim() == entry) {
            if !updated.is_empty() && !updated.ends_with('\n') {
                updated.push('\n');
            }
            updated.push_str(entry);
            updated.push('\n');
        }
    }

    if updated != existing {
        std::fs::write(&gitignore, updated)?;
    }

    Ok(())
}
