//! AppRole identity.
//!
//! The role id / secret id pair exchanged for a short-lived Vault token.

use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{Result, ValidationError};

/// AppRole credentials used to authenticate against Vault.
///
/// Both halves are wiped from memory on drop and redacted from `Debug`.
pub struct AppIdentity {
    role_id: Zeroizing<String>,
    secret_id: Zeroizing<String>,
}

impl AppIdentity {
    /// Create an identity from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyIdentityField` if either value is blank.
    pub fn new(role_id: impl Into<String>, secret_id: impl Into<String>) -> Result<Self> {
        let role_id = Zeroizing::new(role_id.into());
        let secret_id = Zeroizing::new(secret_id.into());

        if role_id.trim().is_empty() {
            return Err(ValidationError::EmptyIdentityField("role_id").into());
        }
        if secret_id.trim().is_empty() {
            return Err(ValidationError::EmptyIdentityField("secret_id").into());
        }

        Ok(Self { role_id, secret_id })
    }

    /// Read the identity from `VAULT_ROLE_ID` and `VAULT_SECRET_ID`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the identity through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let role_id = lookup(constants::ROLE_ID_ENV).unwrap_or_default();
        let secret_id = lookup(constants::SECRET_ID_ENV).unwrap_or_default();
        Self::new(role_id, secret_id)
    }

    pub(crate) fn role_id(&self) -> &str {
        &self.role_id
    }

    pub(crate) fn secret_id(&self) -> &str {
        &self.secret_id
    }
}

impl std::fmt::Debug for AppIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppIdentity")
            .field("role_id", &"[redacted]")
            .field("secret_id", &"[redacted]")
            .finish()
    }
}
