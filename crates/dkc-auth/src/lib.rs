//! Access-token lifecycle for the DKC REST API
//!
//! The DKC API issues short-lived access tokens in exchange for a long-lived
//! master key. This crate acquires those tokens, caches them, checks them
//! against the live service and refreshes them when they are rejected.
//!
//! # Session lifecycle
//!
//! 1. Load the cached token from a [`TokenStore`]
//! 2. If there is one, probe it against `news/company/`
//! 3. If there is none or it was rejected, exchange the master key at
//!    `auth.access.token/{master_key}` and persist the new token
//! 4. Publish the token as the `AccessToken` header on the shared [`HeaderSet`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dkc_auth::{ApiConfig, FileTokenStore, MasterKey, SessionManager};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(FileTokenStore::in_current_dir());
//!     let session = SessionManager::connect(
//!         ApiConfig::default(),
//!         MasterKey::new("xxxxxxxxxx"),
//!         store,
//!     )
//!     .await?;
//!
//!     // Resource clients read the token through a shared view
//!     let headers = session.headers();
//!     assert!(headers.access_token().is_some());
//!     Ok(())
//! }
//! ```
//!
//! # Token Storage
//!
//! ## In-Memory Storage (Testing)
//!
//! ```
//! use dkc_auth::{MemoryTokenStore, TokenStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = MemoryTokenStore::new();
//! store.put("access-token").await?;
//! assert_eq!(store.get().await.as_deref(), Some("access-token"));
//! # Ok(())
//! # }
//! # tokio_test::block_on(example()).unwrap();
//! ```
//!
//! ## File Storage (Default)
//!
//! [`FileTokenStore`] keeps `{"time_update": ..., "access_token": ...}` in
//! `access_token.json` under a configurable directory. A missing or corrupt
//! file reads as "no token" so the session simply acquires a new one.
//!
//! # Important Notes
//!
//! - Token persistence is best effort: a failed save is logged, never fatal
//! - A refused master key is fatal: [`DkcAuthError::Auth`]
//! - There is no background refresh; call [`SessionManager::ensure_valid`] or
//!   [`SessionManager::refresh`] when downstream calls start failing

pub mod acquirer;
pub mod config;
pub mod errors;
pub mod file_store;
pub mod headers;
#[cfg(feature = "keyring-support")]
pub mod keyring_store;
pub mod models;
pub mod secret;
pub mod session;
pub mod store;
pub mod validator;

// Re-export main types
pub use acquirer::TokenAcquirer;
pub use config::{ACCESS_TOKEN_HEADER, ApiConfig, HttpTimeouts};
pub use errors::{DkcAuthError, Result, StorageError};
pub use file_store::FileTokenStore;
pub use headers::{HeaderSet, HeaderView};
#[cfg(feature = "keyring-support")]
pub use keyring_store::KeyringTokenStore;
pub use models::{AuthOutcome, ValidationOutcome};
pub use secret::MasterKey;
pub use session::{SessionManager, SessionState};
pub use store::{MemoryTokenStore, TokenRecord, TokenStore};
pub use validator::TokenValidator;
