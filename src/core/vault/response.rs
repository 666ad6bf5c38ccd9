//! Vault response bodies.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::domain::{AccessToken, CredentialBundle, SecretPath};
use crate::error::{FetchError, Result};

const ACCESS_KEY_FIELD: &str = "access_key";
const SECRET_KEY_FIELD: &str = "secret_key";

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

/// Parse a body as JSON. Only bodies that are not JSON at all are malformed;
/// JSON of the wrong shape is classified by the caller.
fn parse_json(body: &str, stage: &'static str) -> Result<Value> {
    serde_json::from_str(body)
        .map_err(|source| FetchError::MalformedResponse { stage, source }.into())
}

/// Extract `auth.client_token` from a login body.
pub(super) fn parse_login(body: &str) -> Result<AccessToken> {
    let parsed = parse_json(body, "login")?;
    let rejected = |reason: &str| FetchError::Authentication(reason.to_string());

    let auth = parsed
        .get("auth")
        .and_then(Value::as_object)
        .ok_or_else(|| rejected("response has no auth block"))?;

    if let Some(ttl) = auth.get("lease_duration").and_then(Value::as_u64) {
        tracing::debug!(ttl_secs = ttl, "token issued");
    }

    match auth.get("client_token") {
        Some(Value::String(token)) if !token.is_empty() => Ok(AccessToken::new(token.clone())),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            Err(rejected("response has no client token").into())
        }
        Some(_) => Err(rejected("client token is not a string").into()),
    }
}

/// Extract the two credential fields from `data.data` of a KV v2 body.
pub(super) fn parse_secret(body: &str, path: &SecretPath) -> Result<CredentialBundle> {
    let parsed = parse_json(body, "secret read")?;

    let missing = |reason: String| FetchError::SecretNotFound {
        path: path.to_string(),
        reason,
    };

    let data = parsed
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| missing("response has no data block".to_string()))?;

    if let Some(version) = data
        .get("metadata")
        .and_then(|m| m.get("version"))
        .and_then(Value::as_u64)
    {
        tracing::debug!(version, "secret version");
    }

    let fields: &Map<String, Value> = data
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| missing("response has no data.data block".to_string()))?;

    let field = |name: &str| -> std::result::Result<String, FetchError> {
        match fields.get(name) {
            Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
            Some(Value::String(_)) => Err(missing(format!("field {} is empty", name))),
            Some(_) => Err(missing(format!("field {} is not a string", name))),
            None => Err(missing(format!("field {} is missing", name))),
        }
    };

    let access_key = field(ACCESS_KEY_FIELD)?;
    let secret_key = field(SECRET_KEY_FIELD)?;

    Ok(CredentialBundle::new(access_key, secret_key))
}

/// Human-readable reason for a non-2xx response.
///
/// Uses Vault's `errors` array when present; the raw body is never echoed.
pub(super) fn describe_failure(status: u16, body: &str) -> String {
    let errors = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.errors)
        .unwrap_or_default();

    if errors.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, errors.join("; "))
    }
}
