//! Error types.
//!
//! One enum per concern, wrapped by the top-level [`Error`]. Messages name the
//! operation that failed and never carry secret values.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Exit code the process should terminate with for this error.
    ///
    /// A failed child command passes its own code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Exec(ExecError::CommandFailed { exit_code, .. })
            | Error::Pipeline(PipelineError::StepFailed { exit_code, .. })
                if *exit_code != 0 =>
            {
                *exit_code
            }
            _ => 1,
        }
    }
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("already initialized: {0} exists (use --force to overwrite)")]
    AlreadyInitialized(String),

    #[error("missing required field: {field} (set it in .vaultform.toml or via {env})")]
    MissingField {
        field: &'static str,
        env: &'static str,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("identity field {0} is empty (set VAULT_ROLE_ID and VAULT_SECRET_ID)")]
    EmptyIdentityField(&'static str),

    #[error("invalid secret path '{path}': {reason}")]
    InvalidSecretPath { path: String, reason: String },
}

/// Credential fetch errors.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("secret not found at {path}: {reason}")]
    SecretNotFound { path: String, reason: String },

    #[error("malformed response from {stage}: {source}")]
    MalformedResponse {
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("vault unreachable during {stage}: {reason}")]
    Unreachable { stage: &'static str, reason: String },

    #[error("invalid vault endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Scoped command execution errors.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("no command specified")]
    EmptyCommand,

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with code {exit_code}")]
    CommandFailed {
        program: String,
        exit_code: i32,
        output: String,
    },
}

/// Step orchestration errors.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("working directory not found: {0}")]
    MissingWorkingDir(String),

    #[error("no .tf files in {0}")]
    NoConfigurationFiles(String),

    #[error("{0} not found on PATH")]
    ToolNotFound(String),

    #[error("approval denied for {0}")]
    ApprovalDenied(String),

    #[error("approval required for {0} but no terminal is attached (pass --confirm {0})")]
    ApprovalUnavailable(String),

    #[error("{step} step failed: {message}")]
    StepFailed {
        step: String,
        message: String,
        exit_code: i32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
