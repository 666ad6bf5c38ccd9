//! Constants used throughout vaultform.
//!
//! Centralizes magic strings and default configuration values.

/// Configuration file name (.vaultform.toml).
pub const CONFIG_FILE: &str = ".vaultform.toml";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "VAULTFORM_CONFIG";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "VAULTFORM_LOG";

/// Vault address override.
pub const VAULT_ADDR_ENV: &str = "VAULT_ADDR";

/// Secret path override.
pub const VAULT_SECRET_PATH_ENV: &str = "VAULT_SECRET_PATH";

/// Vault Enterprise namespace override.
pub const VAULT_NAMESPACE_ENV: &str = "VAULT_NAMESPACE";

/// AppRole role id.
pub const ROLE_ID_ENV: &str = "VAULT_ROLE_ID";

/// AppRole secret id.
pub const SECRET_ID_ENV: &str = "VAULT_SECRET_ID";

/// Child environment variable bound to the fetched access key.
pub const ACCESS_KEY_ENV: &str = "AWS_ACCESS_KEY_ID";

/// Child environment variable bound to the fetched secret key.
pub const SECRET_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";

/// Header carrying the Vault client token.
pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// Header carrying the Vault Enterprise namespace.
pub const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Default AppRole auth mount.
pub const DEFAULT_AUTH_MOUNT: &str = "approle";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default provisioning binary.
pub const DEFAULT_BINARY: &str = "terraform";

/// Default variables file template; `{env}` is replaced by the environment name.
pub const DEFAULT_VAR_FILE: &str = "environments/{env}.tfvars";

/// Default saved plan file.
pub const DEFAULT_PLAN_FILE: &str = "tfplan";

/// Placeholder substituted in the variables file template.
pub const ENV_PLACEHOLDER: &str = "{env}";

/// Gitignore entries keeping Terraform artifacts out of version control.
/// The configured plan file is appended to these.
pub const GITIGNORE_ENTRIES: &[&str] = &[".terraform/", "*.tfstate", "*.tfstate.*"];
