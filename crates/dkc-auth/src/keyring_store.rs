use std::sync::Arc;

use keyring::Entry;
use tracing::{debug, error};

use crate::errors::StorageError;
use crate::store::{StoredToken, TokenRecord, TokenStore};

const DEFAULT_SERVICE: &str = "dkc-api";
const DEFAULT_ACCOUNT: &str = "access-token:v1";

/// Token store backed by the OS keyring
///
/// The secret is the same JSON record the file store writes. An entry that
/// is missing or does not parse reads as no token.
///
/// Keyring backends block (D-Bus round trips, Keychain prompts), so every
/// call runs on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    entry: Arc<Entry>,
}

impl KeyringTokenStore {
    pub fn new(service: &str, account: &str) -> Result<Self, StorageError> {
        let entry = Entry::new(service, account)
            .map_err(|e| StorageError::Keyring(format!("Failed to access keyring: {}", e)))?;
        Ok(Self::from_entry(entry))
    }

    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(DEFAULT_SERVICE, DEFAULT_ACCOUNT)
    }

    pub(crate) fn from_entry(entry: Entry) -> Self {
        Self {
            entry: Arc::new(entry),
        }
    }
}

#[async_trait::async_trait]
impl TokenStore for KeyringTokenStore {
    async fn get(&self) -> Option<String> {
        let entry = Arc::clone(&self.entry);
        let read = match tokio::task::spawn_blocking(move || entry.get_password()).await {
            Ok(read) => read,
            Err(e) => {
                debug!("Keyring read task failed: {}", e);
                return None;
            }
        };

        match read {
            Ok(secret) => StoredToken::parse(&secret),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                debug!("Failed to read token from keyring: {}", e);
                None
            }
        }
    }

    async fn put(&self, access_token: &str) -> Result<(), StorageError> {
        let secret = serde_json::to_string(&TokenRecord::new(access_token))?;
        let entry = Arc::clone(&self.entry);

        let written = tokio::task::spawn_blocking(move || entry.set_password(&secret))
            .await
            .map_err(|e| StorageError::Keyring(format!("Keyring write task failed: {}", e)))?;

        written.map_err(|e| {
            error!("Failed to write token to keyring: {}", e);
            StorageError::Keyring(format!("Failed to write to keyring: {}", e))
        })
    }

    fn name(&self) -> &str {
        "keyring"
    }
}
