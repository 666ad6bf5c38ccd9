//! AppRole login.

use serde::Serialize;
use tracing::{debug, trace};

use super::{response, VaultClient};
use crate::core::domain::{AccessToken, AppIdentity};
use crate::error::{FetchError, Result};

#[derive(Serialize)]
struct LoginRequest<'a> {
    role_id: &'a str,
    secret_id: &'a str,
}

impl VaultClient {
    /// Exchange an AppRole identity for a client token.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Authentication` on a non-2xx status or a body
    /// without `auth.client_token`, `FetchError::MalformedResponse` if the body
    /// is not JSON, and `FetchError::Unreachable` on transport failure.
    pub fn login(&self, identity: &AppIdentity) -> Result<AccessToken> {
        let url = self.url(&format!("auth/{}/login", self.auth_mount));
        trace!(url = %url, "approle login");

        let body = LoginRequest {
            role_id: identity.role_id(),
            secret_id: identity.secret_id(),
        };

        let response = self
            .with_namespace(self.http.post(&url))
            .json(&body)
            .send()
            .map_err(|e| FetchError::Unreachable {
                stage: "login",
                reason: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().map_err(|e| FetchError::Unreachable {
            stage: "login",
            reason: e.to_string(),
        })?;
        debug!(status = status.as_u16(), "login response");

        if !status.is_success() {
            return Err(
                FetchError::Authentication(response::describe_failure(status.as_u16(), &text))
                    .into(),
            );
        }

        response::parse_login(&text)
    }
}
