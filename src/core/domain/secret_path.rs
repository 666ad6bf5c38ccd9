//! Secret path type.
//!
//! Location of a KV entry, e.g. `kv/data/aws/terraform`.

use crate::error::{Result, ValidationError};

// Would otherwise be read as query, fragment or escape in the request URL.
const URL_METACHARACTERS: &[char] = &['?', '#', '%'];

/// A validated path to a versioned key/value secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretPath(String);

impl SecretPath {
    /// Parse and normalize a secret path.
    ///
    /// Leading and trailing slashes are trimmed. Paths must be non-empty,
    /// contain no whitespace or URL metacharacters (`?`, `#`, `%`), and have
    /// no empty, `.` or `..` segments.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim_matches('/');
        let invalid = |reason: &str| ValidationError::InvalidSecretPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("path is empty").into());
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid("path contains whitespace").into());
        }
        if let Some(c) = trimmed.chars().find(|c| URL_METACHARACTERS.contains(c)) {
            return Err(invalid(&format!("path contains '{}'", c)).into());
        }
        if trimmed
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(invalid("path contains an empty or relative segment").into());
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Whether the path addresses the KV v2 data endpoint.
    pub fn is_versioned(&self) -> bool {
        self.0.split('/').skip(1).any(|segment| segment == "data")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SecretPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SecretPath {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
