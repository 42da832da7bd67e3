use std::path::PathBuf;

use thiserror::Error;

/// DKC authentication error types
#[derive(Error, Debug)]
pub enum DkcAuthError {
    /// The auth endpoint answered with a well-formed failure body
    #[error("Access token not issued (code {code}): {message}")]
    Auth { code: i64, message: String },

    /// The response body matched none of the expected shapes
    #[error("Unexpected response from {endpoint} (HTTP {status}): {body_snippet}")]
    Protocol {
        endpoint: String,
        status: reqwest::StatusCode,
        body_snippet: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid header value for '{name}'")]
    InvalidHeader { name: String },

    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),
}

impl DkcAuthError {
    /// Build a protocol error, keeping only the head of the offending body
    pub fn protocol(endpoint: impl Into<String>, status: reqwest::StatusCode, body: &str) -> Self {
        Self::Protocol {
            endpoint: endpoint.into(),
            status,
            body_snippet: body.chars().take(200).collect(),
        }
    }

    /// True when the remote service refused the master key
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

/// Failures while persisting a token. Never fatal for a session.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to write token file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to serialize token record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("Token store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, DkcAuthError>;
