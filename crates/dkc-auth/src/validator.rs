use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{ApiConfig, endpoints};
use crate::errors::Result;
use crate::models::ValidationOutcome;

/// Checks whether the service still accepts a token.
///
/// The service reports a dead token through a `message` field in the body
/// rather than through the status code.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    config: ApiConfig,
    http: Client,
}

impl TokenValidator {
    pub fn new(config: ApiConfig, http: Client) -> Self {
        Self { config, http }
    }

    #[instrument(skip(self, headers))]
    pub async fn probe(&self, headers: HeaderMap) -> Result<ValidationOutcome> {
        let url = self.config.endpoint(endpoints::PROBE.iter().copied())?;

        debug!("Probing access token against {}", url.path());
        let response = self.http.get(url).headers(headers).send().await?;

        let status = response.status();
        let body = response.text().await?;

        Ok(interpret_probe_body(status, &body))
    }
}

fn interpret_probe_body(status: reqwest::StatusCode, body: &str) -> ValidationOutcome {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            return ValidationOutcome::Rejected(format!(
                "unreadable probe response (HTTP {})",
                status.as_u16()
            ));
        }
    };

    match value.get("message") {
        None | Some(Value::Null) => ValidationOutcome::Ok,
        Some(Value::String(message)) if message.is_empty() => ValidationOutcome::Ok,
        Some(Value::String(message)) => ValidationOutcome::Rejected(message.clone()),
        Some(other) => ValidationOutcome::Rejected(other.to_string()),
    }
}
