//! KV v2 secret reads.

use tracing::{debug, trace};

use super::{response, VaultClient};
use crate::core::constants;
use crate::core::domain::{AccessToken, CredentialBundle, SecretPath};
use crate::error::{FetchError, Result};

impl VaultClient {
    /// Read the credential bundle stored at `path`.
    ///
    /// Consumes the token: it authorizes exactly this one read.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::SecretNotFound` on a non-2xx status or a body
    /// lacking `data.data.access_key` / `data.data.secret_key`,
    /// `FetchError::MalformedResponse` if the body is not JSON, and
    /// `FetchError::Unreachable` on transport failure.
    pub fn read_credentials(
        &self,
        token: AccessToken,
        path: &SecretPath,
    ) -> Result<CredentialBundle> {
        let url = self.url(path.as_str());
        trace!(url = %url, "reading secret");

        let response = self
            .with_namespace(self.http.get(&url))
            .header(constants::TOKEN_HEADER, token.expose())
            .send()
            .map_err(|e| FetchError::Unreachable {
                stage: "secret read",
                reason: e.to_string(),
            })?;
        drop(token);

        let status = response.status();
        let text = response.text().map_err(|e| FetchError::Unreachable {
            stage: "secret read",
            reason: e.to_string(),
        })?;
        debug!(status = status.as_u16(), path = %path, "secret response");

        if !status.is_success() {
            return Err(FetchError::SecretNotFound {
                path: path.to_string(),
                reason: response::describe_failure(status.as_u16(), &text),
            }
            .into());
        }

        response::parse_secret(&text, path)
    }
}
