//! Simulated Vault server.
//!
//! Wraps a `wiremock` server driven by a runtime owned by the harness, so the
//! blocking client under test can be called from a plain test thread.

use serde_json::{json, Value};
use tokio::runtime::{Builder, Runtime};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::{ACCESS_KEY, ROLE_ID, SECRET_ID, SECRET_KEY, SECRET_PATH, TOKEN};

pub struct MockVault {
    rt: Runtime,
    server: MockServer,
}

impl MockVault {
    /// Start an empty server; nothing is mounted.
    pub fn start() -> Self {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("failed to build runtime");
        let server = rt.block_on(MockServer::start());
        Self { rt, server }
    }

    /// Server with the standard identity, token and `AK`/`SK` bundle mounted.
    pub fn standard() -> Self {
        Self::with_credentials(ACCESS_KEY, SECRET_KEY)
    }

    /// Server with the standard identity and token serving the given pair.
    pub fn with_credentials(access_key: &str, secret_key: &str) -> Self {
        let vault = Self::start();
        vault.mount_login(ROLE_ID, SECRET_ID, TOKEN);
        vault.mount_secret(
            SECRET_PATH,
            TOKEN,
            json!({ "access_key": access_key, "secret_key": secret_key }),
        );
        vault
    }

    /// Base URL (loopback HTTP).
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Accept exactly this identity on the AppRole login endpoint.
    pub fn mount_login(&self, role_id: &str, secret_id: &str, token: &str) {
        self.mount(
            Mock::given(method("POST"))
                .and(path("/v1/auth/approle/login"))
                .and(body_json(json!({ "role_id": role_id, "secret_id": secret_id })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "request_id": "4f2c9a1e",
                    "lease_duration": 0,
                    "auth": {
                        "client_token": token,
                        "accessor": "acc-1",
                        "policies": ["default", "terraform"],
                        "lease_duration": 1200,
                        "renewable": true
                    }
                }))),
        );
    }

    /// Answer every login with `status` and `body`.
    pub fn mount_login_response(&self, status: u16, body: Value) {
        self.mount(
            Mock::given(method("POST"))
                .and(path("/v1/auth/approle/login"))
                .respond_with(ResponseTemplate::new(status).set_body_json(body)),
        );
    }

    /// Serve `data` as the KV v2 secret at `secret_path` to holders of `token`.
    pub fn mount_secret(&self, secret_path: &str, token: &str, data: Value) {
        self.mount(
            Mock::given(method("GET"))
                .and(path(format!("/v1/{}", secret_path)))
                .and(header("X-Vault-Token", token))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "request_id": "8d1b7f30",
                    "data": {
                        "data": data,
                        "metadata": { "version": 3, "destroyed": false }
                    }
                }))),
        );
    }

    /// Answer every read of `secret_path` with `status` and `body`.
    pub fn mount_secret_response(&self, secret_path: &str, status: u16, body: Value) {
        self.mount(
            Mock::given(method("GET"))
                .and(path(format!("/v1/{}", secret_path)))
                .respond_with(ResponseTemplate::new(status).set_body_json(body)),
        );
    }

    /// Every request the server has seen so far.
    pub fn requests(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    /// Requests matching `http_method` and `url_path`.
    pub fn count(&self, http_method: &str, url_path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method.as_str() == http_method && r.url.path() == url_path)
            .count()
    }

    /// Number of AppRole logins received.
    pub fn logins(&self) -> usize {
        self.count("POST", "/v1/auth/approle/login")
    }

    /// Number of reads of the standard secret path received.
    pub fn reads(&self) -> usize {
        self.count("GET", &format!("/v1/{}", SECRET_PATH))
    }

    fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }
}
