use serde::{Deserialize, Serialize};

/// Successful `auth.access.token` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSuccessResponse {
    pub code: i64,
    pub access_token: String,
}

/// Failed `auth.access.token` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthErrorResponse {
    pub code: i64,
    pub message: String,
}

/// Body of the auth endpoint, matched structurally: success shape first,
/// then the error shape. The HTTP status plays no part.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AuthResponse {
    Success(AuthSuccessResponse),
    Error(AuthErrorResponse),
}

/// Result of exchanging a master key at the auth endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success { access_token: String },
    Failure { code: i64, message: String },
}

impl From<AuthResponse> for AuthOutcome {
    fn from(response: AuthResponse) -> Self {
        match response {
            AuthResponse::Success(ok) => Self::Success {
                access_token: ok.access_token,
            },
            AuthResponse::Error(err) => Self::Failure {
                code: err.code,
                message: err.message,
            },
        }
    }
}

/// Result of probing the service with the current token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok,
    Rejected(String),
}

impl ValidationOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}
