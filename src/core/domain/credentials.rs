//! Fetched credentials and the token that authorizes reading them.

use zeroize::Zeroizing;

/// Short-lived Vault client token.
///
/// Not `Clone`: a token is moved into the one read call it authorizes.
pub struct AccessToken {
    value: Zeroizing<String>,
}

impl AccessToken {
    pub(crate) fn new(value: String) -> Self {
        Self {
            value: Zeroizing::new(value),
        }
    }

    pub(crate) fn expose(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([redacted])")
    }
}

/// Cloud access key pair read from Vault.
///
/// Not `Clone`. The scoped executor takes it by value, so a bundle cannot
/// outlive the command it was fetched for. Both fields are wiped on drop.
pub struct CredentialBundle {
    access_key: Zeroizing<String>,
    secret_key: Zeroizing<String>,
}

impl CredentialBundle {
    /// Build a bundle from its two fields.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: Zeroizing::new(access_key.into()),
            secret_key: Zeroizing::new(secret_key.into()),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub(crate) fn into_parts(self) -> (Zeroizing<String>, Zeroizing<String>) {
        (self.access_key, self.secret_key)
    }

    /// Access key with everything but the first and last four characters hidden.
    ///
    /// Keys of eight characters or fewer are hidden entirely.
    pub fn masked_access_key(&self) -> String {
        mask(&self.access_key)
    }
}

impl std::fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("access_key", &self.masked_access_key())
            .field("secret_key", &"[redacted]")
            .finish()
    }
}

fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}
