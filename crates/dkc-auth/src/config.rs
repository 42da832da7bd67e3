use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::errors::{DkcAuthError, Result};

/// DKC API endpoint paths, relative to the base URL
pub mod endpoints {
    pub const DEFAULT_BASE_URL: &str = "https://api.dkc.ru/v1";

    /// Followed by the master key as its own path segment
    pub const AUTH_ACCESS_TOKEN: &str = "auth.access.token";

    /// Cheapest authenticated endpoint, used to probe a cached token
    pub const PROBE: &[&str] = &["news", "company", ""];
}

/// Header carrying the access token on every authenticated request
pub const ACCESS_TOKEN_HEADER: &str = "AccessToken";

/// Default file name for the file-backed token store
pub const DEFAULT_TOKEN_FILE: &str = "access_token.json";

/// Offset of the timezone token records are stamped in (Moscow, no DST)
pub const RECORD_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(15),
            request: Duration::from_secs(30),
        }
    }
}

/// Connection settings shared by the session and every resource client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are appended to
    pub base_url: Url,

    /// Headers sent with every request before the access token is known
    pub default_headers: HeaderMap,

    /// HTTP client timeouts
    pub http_timeouts: HttpTimeouts,

    /// Custom user agent (optional)
    pub user_agent: Option<String>,

    /// Emit debug-level traces of outgoing header names and query strings
    pub debug: bool,
}

impl ApiConfig {
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            ..Self::default()
        })
    }

    /// Add or replace a default header
    pub fn insert_default_header(&mut self, name: &str, value: &str) -> Result<()> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            DkcAuthError::InvalidHeader {
                name: name.to_string(),
            }
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|_| DkcAuthError::InvalidHeader {
            name: name.to_string(),
        })?;
        self.default_headers.insert(header_name, header_value);
        Ok(())
    }

    /// Append path segments to the base URL. Segments are percent-encoded,
    /// an empty trailing segment yields a trailing slash.
    pub fn endpoint<I, S>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DkcAuthError::Url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build the reqwest client every component shares
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .connect_timeout(self.http_timeouts.connect)
            .timeout(self.http_timeouts.request)
            .user_agent(self.user_agent.as_deref().unwrap_or("dkc-api"))
            .build()?;
        Ok(client)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            base_url: Url::parse(endpoints::DEFAULT_BASE_URL).expect("valid default base URL"),
            default_headers,
            http_timeouts: HttpTimeouts::default(),
            user_agent: Some("dkc-api".to_string()),
            debug: false,
        }
    }
}
