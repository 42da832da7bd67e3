use thiserror::Error;

/// Failures of a resource call that are not API-level error bodies.
///
/// Error bodies the service sends on purpose come back as
/// [`ApiResponse::Error`](crate::ApiResponse::Error) or
/// [`ApiResponse::ErrorAlternative`](crate::ApiResponse::ErrorAlternative).
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response from {endpoint} (HTTP {status}): {body_snippet}")]
    Protocol {
        endpoint: String,
        status: reqwest::StatusCode,
        body_snippet: String,
    },

    #[error("Endpoint URL error: {0}")]
    Url(#[from] dkc_auth::DkcAuthError),
}

impl ResourceError {
    pub(crate) fn protocol(endpoint: &str, status: reqwest::StatusCode, body: &str) -> Self {
        Self::Protocol {
            endpoint: endpoint.to_string(),
            status,
            body_snippet: body.chars().take(200).collect(),
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResourceError>;
