//! Outgoing header set shared between a session and its resource clients.
//!
//! The session owns the only [`HeaderSet`] (write access). Resource clients get
//! a [`HeaderView`], which reads the same map, so a token refresh is visible to
//! every client at once.

use std::sync::{Arc, RwLock};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::ACCESS_TOKEN_HEADER;
use crate::errors::{DkcAuthError, Result};

/// Write handle over the session's outgoing headers
#[derive(Debug)]
pub struct HeaderSet {
    inner: Arc<RwLock<HeaderMap>>,
}

impl HeaderSet {
    pub fn new(defaults: HeaderMap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(defaults)),
        }
    }

    /// Insert or replace the access token entry
    pub fn set_access_token(&self, token: &str) -> Result<()> {
        let value = HeaderValue::from_str(token).map_err(|_| DkcAuthError::InvalidHeader {
            name: ACCESS_TOKEN_HEADER.to_string(),
        })?;
        let mut headers = self.inner.write().unwrap_or_else(|e| e.into_inner());
        headers.insert(HeaderName::from_static("accesstoken"), value);
        Ok(())
    }

    pub fn view(&self) -> HeaderView {
        HeaderView {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn snapshot(&self) -> HeaderMap {
        self.view().snapshot()
    }

    pub fn access_token(&self) -> Option<String> {
        self.view().access_token()
    }
}

/// Read-only handle over a session's outgoing headers
#[derive(Debug, Clone)]
pub struct HeaderView {
    inner: Arc<RwLock<HeaderMap>>,
}

impl HeaderView {
    /// Copy of the current headers, taken under the read lock
    pub fn snapshot(&self) -> HeaderMap {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// Header names only, for debug traces that must not leak the token
    pub fn names(&self) -> Vec<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .map(|k| k.as_str().to_string())
            .collect()
    }
}
