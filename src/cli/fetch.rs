//! Fetch command.
//!
//! Authenticates and reads the credential bundle, printing only a masked
//! summary. Useful for checking a role and path before running anything.

use serde::Serialize;
use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::domain::AppIdentity;
use crate::core::vault::{CredentialSource, VaultFetcher};
use crate::error::Result;

#[derive(Serialize)]
struct FetchSummary<'a> {
    endpoint: &'a str,
    path: &'a str,
    access_key: String,
    secret_key_length: usize,
}

/// Build a fetcher from the configuration and the identity in the environment.
pub(crate) fn fetcher(config: &Config) -> Result<VaultFetcher> {
    let settings = config.resolve_vault()?;
    let identity = AppIdentity::from_env()?;
    VaultFetcher::from_settings(&settings, identity)
}

/// Fetch credentials and print a masked summary.
pub fn execute(config: &Config, json: bool) -> Result<()> {
    let fetcher = fetcher(config)?;
    let bundle = fetcher.fetch()?;
    info!(path = %fetcher.path(), "credentials fetched");

    let summary = FetchSummary {
        endpoint: fetcher.endpoint(),
        path: fetcher.path().as_str(),
        access_key: bundle.masked_access_key(),
        secret_key_length: bundle.secret_key().chars().count(),
    };
    drop(bundle);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    output::success(&format!("fetched credentials from {}", output::path(summary.path)));
    output::kv("endpoint", summary.endpoint);
    output::kv("access key", &summary.access_key);
    output::kv("secret key", format!("({} chars, hidden)", summary.secret_key_length));

    Ok(())
}
