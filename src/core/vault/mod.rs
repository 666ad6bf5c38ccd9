//! Vault credential fetching.
//!
//! `VaultClient` talks to the secrets store: an AppRole login for a short-lived
//! token, then a KV v2 read that yields a [`CredentialBundle`].
//!
//! ## Adding a New Source
//!
//! Callers that only need credentials depend on [`CredentialSource`], so a
//! different store (or a test stub) only has to implement `fetch`.

mod auth;
mod kv;
mod response;

use reqwest::blocking::Client;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

use crate::core::config::VaultSettings;
use crate::core::constants;
use crate::core::domain::{AppIdentity, CredentialBundle, SecretPath};
use crate::error::{FetchError, Result};

/// Something that can produce a fresh credential bundle on demand.
///
/// Every call must fetch anew; implementations do not cache.
pub trait CredentialSource {
    /// Fetch a fresh bundle.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if authentication or the secret read fails.
    fn fetch(&self) -> Result<CredentialBundle>;
}

/// Blocking HTTP client for one Vault endpoint.
#[derive(Debug)]
pub struct VaultClient {
    http: Client,
    base: String,
    auth_mount: String,
    namespace: Option<String>,
}

impl VaultClient {
    /// Client with default auth mount and timeout.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidEndpoint` if the endpoint is not an HTTPS
    /// URL (plain HTTP is accepted for loopback hosts only).
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_options(
            endpoint,
            constants::DEFAULT_AUTH_MOUNT,
            None,
            Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Client built from resolved settings.
    pub fn from_settings(settings: &VaultSettings) -> Result<Self> {
        Self::with_options(
            &settings.address,
            &settings.auth_mount,
            settings.namespace.clone(),
            settings.timeout,
        )
    }

    fn with_options(
        endpoint: &str,
        auth_mount: &str,
        namespace: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base = validate_endpoint(endpoint)?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vaultform/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        debug!(endpoint = %base, auth_mount, "vault client ready");

        Ok(Self {
            http,
            base,
            auth_mount: auth_mount.trim_matches('/').to_string(),
            namespace,
        })
    }

    /// Endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.base
    }

    fn url(&self, api_path: &str) -> String {
        format!("{}/v1/{}", self.base, api_path)
    }

    fn with_namespace(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.namespace {
            Some(namespace) => request.header(constants::NAMESPACE_HEADER, namespace),
            None => request,
        }
    }
}

/// Fetches credentials from Vault with a fixed identity and path.
#[derive(Debug)]
pub struct VaultFetcher {
    client: VaultClient,
    identity: AppIdentity,
    path: SecretPath,
}

impl VaultFetcher {
    pub fn new(client: VaultClient, identity: AppIdentity, path: SecretPath) -> Self {
        Self {
            client,
            identity,
            path,
        }
    }

    /// Fetcher built from resolved settings.
    pub fn from_settings(settings: &VaultSettings, identity: AppIdentity) -> Result<Self> {
        let client = VaultClient::from_settings(settings)?;
        Ok(Self::new(client, identity, settings.secret_path.clone()))
    }

    pub fn path(&self) -> &SecretPath {
        &self.path
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

impl CredentialSource for VaultFetcher {
    fn fetch(&self) -> Result<CredentialBundle> {
        let token = self.client.login(&self.identity)?;
        self.client.read_credentials(token, &self.path)
    }
}

/// Authenticate with `identity` and read the credentials at `path`.
///
/// The token is consumed by the read and dropped before returning.
///
/// # Errors
///
/// Returns `FetchError::Authentication` if login fails (no read is attempted),
/// `FetchError::SecretNotFound` if the read fails or lacks a field, and
/// `FetchError::MalformedResponse` if either body is not JSON.
pub fn fetch(identity: &AppIdentity, endpoint: &str, path: &SecretPath) -> Result<CredentialBundle> {
    let client = VaultClient::new(endpoint)?;
    let token = client.login(identity)?;
    client.read_credentials(token, path)
}

/// Check an endpoint URL and return it without a trailing slash.
pub(crate) fn validate_endpoint(endpoint: &str) -> Result<String> {
    let invalid = |reason: &str| FetchError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: reason.to_string(),
    };

    let url = reqwest::Url::parse(endpoint.trim()).map_err(|e| invalid(&e.to_string()))?;

    match url.scheme() {
        "https" => {}
        "http" => {
            let loopback = url.host_str().is_some_and(is_loopback);
            if !loopback {
                return Err(invalid("https is required for non-loopback hosts").into());
            }
        }
        other => return Err(invalid(&format!("unsupported scheme '{}'", other)).into()),
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment").into());
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn is_loopback(host: &str) -> bool {
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .map(|ip| ip.is_loopback())
        .unwrap_or(false)
}
