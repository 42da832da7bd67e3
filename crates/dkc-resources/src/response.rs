//! Three-way decoding of resource responses.
//!
//! The DKC API signals errors through the body, not the status code alone.
//! Every response is tried against the endpoint's success model first; on
//! 403 and 500 the `{errorCode, errorMessage}` shape is tried next; anything
//! else must fit `{code, message}`, with the HTTP status standing in for a
//! missing `code`.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ResourceError, Result};
use crate::lenient;

/// Standard API error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

/// Error body the API sends on some 403 and 500 responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseErrorAlternative {
    #[serde(rename = "errorCode", deserialize_with = "lenient::string")]
    pub error_code: String,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

/// Outcome of a resource call that reached the API and got a JSON body back
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success(T),
    Error(ResponseError),
    ErrorAlternative(ResponseErrorAlternative),
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            ApiResponse::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Error text regardless of which error shape the API used
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::Error(e) => Some(&e.message),
            ApiResponse::ErrorAlternative(e) => Some(&e.error_message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            ApiResponse::Success(data) => ApiResponse::Success(f(data)),
            ApiResponse::Error(e) => ApiResponse::Error(e),
            ApiResponse::ErrorAlternative(e) => ApiResponse::ErrorAlternative(e),
        }
    }
}

/// Decode a raw body into the endpoint's success model or one of the error
/// shapes. A body that is not JSON or fits none of them is a protocol error.
pub(crate) fn decode<T: DeserializeOwned>(
    endpoint: &str,
    status: StatusCode,
    body: &str,
) -> Result<ApiResponse<T>> {
    let value: Value =
        serde_json::from_str(body).map_err(|_| ResourceError::protocol(endpoint, status, body))?;

    if let Ok(data) = T::deserialize(&value) {
        return Ok(ApiResponse::Success(data));
    }

    if status == StatusCode::FORBIDDEN || status == StatusCode::INTERNAL_SERVER_ERROR {
        if let Ok(alt) = ResponseErrorAlternative::deserialize(&value) {
            return Ok(ApiResponse::ErrorAlternative(alt));
        }
    }

    let mut value = value;
    if let Value::Object(map) = &mut value {
        map.entry("code")
            .or_insert_with(|| Value::from(status.as_u16()));
    }

    ResponseError::deserialize(&value)
        .map(ApiResponse::Error)
        .map_err(|_| ResourceError::protocol(endpoint, status, body))
}
