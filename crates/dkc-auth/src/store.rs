use std::sync::{Arc, RwLock};

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RECORD_UTC_OFFSET_SECS;
use crate::errors::StorageError;

/// The single persisted unit: the current access token and when it was saved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenRecord {
    #[serde(rename = "time_update")]
    pub saved_at: DateTime<FixedOffset>,
    pub access_token: String,
}

impl TokenRecord {
    /// Stamp a token with the current time in the record timezone
    pub fn new(access_token: impl Into<String>) -> Self {
        let offset = FixedOffset::east_opt(RECORD_UTC_OFFSET_SECS)
            .unwrap_or_else(|| Utc.fix());
        Self {
            saved_at: Utc::now().with_timezone(&offset),
            access_token: access_token.into(),
        }
    }
}

/// Lenient view of a persisted record. Only the token matters when reading,
/// so files with an odd or missing timestamp still yield their token.
#[derive(Debug, Deserialize)]
pub(crate) struct StoredToken {
    #[serde(default)]
    pub access_token: Option<String>,
}

impl StoredToken {
    pub(crate) fn parse(raw: &str) -> Option<String> {
        serde_json::from_str::<StoredToken>(raw)
            .ok()?
            .access_token
            .filter(|t| !t.is_empty())
    }
}

/// Trait for persisting the current access token
///
/// A store holds at most one token; every `put` replaces the previous one.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the persisted token. Missing or unreadable data reads as `None`.
    async fn get(&self) -> Option<String>;

    /// Persist a token, replacing whatever was stored before
    async fn put(&self, access_token: &str) -> Result<(), StorageError>;

    /// Name of this storage backend
    fn name(&self) -> &str {
        "custom"
    }
}

#[async_trait::async_trait]
impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    async fn get(&self) -> Option<String> {
        (**self).get().await
    }

    async fn put(&self, access_token: &str) -> Result<(), StorageError> {
        (**self).put(access_token).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait::async_trait]
impl<T: TokenStore + ?Sized> TokenStore for Box<T> {
    async fn get(&self) -> Option<String> {
        (**self).get().await
    }

    async fn put(&self, access_token: &str) -> Result<(), StorageError> {
        (**self).put(access_token).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// In-memory token store for testing and short-lived processes
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    record: Arc<RwLock<Option<TokenRecord>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, as if a previous session had saved `access_token`
    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self {
            record: Arc::new(RwLock::new(Some(TokenRecord::new(access_token)))),
        }
    }

    pub fn record(&self) -> Option<TokenRecord> {
        self.record.read().ok()?.clone()
    }
}

#[async_trait::async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Option<String> {
        self.record
            .read()
            .ok()?
            .as_ref()
            .map(|r| r.access_token.clone())
            .filter(|t| !t.is_empty())
    }

    async fn put(&self, access_token: &str) -> Result<(), StorageError> {
        *self
            .record
            .write()
            .map_err(|_| StorageError::Unavailable("Lock poisoned".to_string()))? =
            Some(TokenRecord::new(access_token));
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
