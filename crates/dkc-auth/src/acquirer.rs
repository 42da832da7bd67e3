use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{ApiConfig, endpoints};
use crate::errors::{DkcAuthError, Result};
use crate::models::{AuthOutcome, AuthResponse};
use crate::secret::MasterKey;

/// Exchanges the master key for a fresh access token
#[derive(Debug, Clone)]
pub struct TokenAcquirer {
    config: ApiConfig,
    http: Client,
}

impl TokenAcquirer {
    pub fn new(config: ApiConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Request a new access token.
    ///
    /// A failure body from the service is a normal [`AuthOutcome::Failure`];
    /// only a body matching neither shape is an error.
    #[instrument(skip(self, master_key))]
    pub async fn acquire(&self, master_key: &MasterKey) -> Result<AuthOutcome> {
        let url = self
            .config
            .endpoint([endpoints::AUTH_ACCESS_TOKEN, master_key.expose()])?;

        debug!("Requesting new access token");
        let response = self
            .http
            .get(url)
            .headers(self.config.default_headers.clone())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        parse_auth_body(status, &body)
    }
}

/// Match an auth response body against the success and error shapes.
/// The transport status fills in `code` when the body carries none.
fn parse_auth_body(status: reqwest::StatusCode, body: &str) -> Result<AuthOutcome> {
    let mut value: Value = serde_json::from_str(body)
        .map_err(|_| DkcAuthError::protocol(endpoints::AUTH_ACCESS_TOKEN, status, body))?;

    if let Value::Object(map) = &mut value {
        map.entry("code")
            .or_insert_with(|| Value::from(status.as_u16()));
    }

    let response: AuthResponse = serde_json::from_value(value)
        .map_err(|_| DkcAuthError::protocol(endpoints::AUTH_ACCESS_TOKEN, status, body))?;

    let outcome = AuthOutcome::from(response);
    match &outcome {
        AuthOutcome::Success { access_token } if access_token.trim().is_empty() => {
            return Err(DkcAuthError::protocol(endpoints::AUTH_ACCESS_TOKEN, status, body));
        }
        AuthOutcome::Failure { code, message } => {
            debug!(code, "Auth endpoint refused the master key: {}", message);
        }
        AuthOutcome::Success { .. } => {}
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn acquirer_for(server: &MockServer) -> TokenAcquirer {
        let config = ApiConfig::with_base_url(&server.uri()).unwrap();
        let http = config.build_http_client().unwrap();
        TokenAcquirer::new(config, http)
    }

    #[test]
    fn test_status_fills_missing_code() {
        let outcome = parse_auth_body(StatusCode::OK, r#"{"access_token": "tok"}"#).unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Success {
                access_token: "tok".to_string()
            }
        );

        let outcome = parse_auth_body(StatusCode::UNAUTHORIZED, r#"{"message": "bad key"}"#).unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Failure {
                code: 401,
                message: "bad key".to_string()
            }
        );
    }

    #[test]
    fn test_body_code_wins_over_status() {
        let outcome =
            parse_auth_body(StatusCode::OK, r#"{"code": 403, "message": "invalid master key"}"#).unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Failure {
                code: 403,
                message: "invalid master key".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_bodies_are_protocol_errors() {
        for body in ["<html>oops</html>", r#"{"status": "down"}"#, "[]", ""] {
            let result = parse_auth_body(StatusCode::BAD_GATEWAY, body);
            assert!(
                matches!(result, Err(DkcAuthError::Protocol { .. })),
                "body {:?} should be a protocol error",
                body
            );
        }
    }

    #[test]
    fn test_blank_token_is_protocol_error() {
        for body in [
            r#"{"code": 200, "access_token": ""}"#,
            r#"{"access_token": "   "}"#,
        ] {
            let result = parse_auth_body(StatusCode::OK, body);
            assert!(
                matches!(result, Err(DkcAuthError::Protocol { .. })),
                "body {:?} should be a protocol error",
                body
            );
        }
    }

    #[tokio::test]
    async fn test_acquire_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth.access.token/master-123"))
            .and(header("accept", "application/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "access_token": "tok123" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = acquirer_for(&server)
            .acquire(&MasterKey::new("master-123"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Success {
                access_token: "tok123".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_acquire_success_body_with_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth.access.token/master-123"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "access_token": "still-ok" })))
            .mount(&server)
            .await;

        let outcome = acquirer_for(&server)
            .acquire(&MasterKey::new("master-123"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Success {
                access_token: "still-ok".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_acquire_failure_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth.access.token/wrong"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad key" })))
            .mount(&server)
            .await;

        let outcome = acquirer_for(&server)
            .acquire(&MasterKey::new("wrong"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Failure {
                code: 401,
                message: "bad key".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_acquire_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let result = acquirer_for(&server).acquire(&MasterKey::new("key")).await;

        match result {
            Err(DkcAuthError::Protocol { status, body_snippet, .. }) => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body_snippet, "Bad Gateway");
            }
            other => panic!("Expected Protocol error, got {:?}", other),
        }
    }
}
