use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::acquirer::TokenAcquirer;
use crate::config::ApiConfig;
use crate::errors::{DkcAuthError, Result};
use crate::headers::{HeaderSet, HeaderView};
use crate::models::{AuthOutcome, ValidationOutcome};
use crate::secret::MasterKey;
use crate::store::TokenStore;
use crate::validator::TokenValidator;

/// Where a session is in its token lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Refreshing,
    Valid,
}

/// Owns the current access token and the outgoing header set.
///
/// Construction loads a cached token, probes it, and falls back to a fresh
/// acquisition when there is none or the service rejects it. A session that
/// cannot obtain a token is never returned.
pub struct SessionManager {
    config: ApiConfig,
    http: reqwest::Client,
    master_key: MasterKey,
    store: Arc<dyn TokenStore>,
    acquirer: TokenAcquirer,
    validator: TokenValidator,
    headers: HeaderSet,
    state: SessionState,
}

impl SessionManager {
    /// Build a session and bring it to [`SessionState::Valid`]
    #[instrument(skip_all, fields(store = store.name()))]
    pub async fn connect(
        config: ApiConfig,
        master_key: MasterKey,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self> {
        let http = config.build_http_client()?;
        let mut session = Self::with_client(config, http, master_key, store);
        session.initialize().await?;
        Ok(session)
    }

    /// Like [`SessionManager::connect`] but without running the token
    /// lifecycle; the session starts `Uninitialized`.
    pub fn with_client(
        config: ApiConfig,
        http: reqwest::Client,
        master_key: MasterKey,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let acquirer = TokenAcquirer::new(config.clone(), http.clone());
        let validator = TokenValidator::new(config.clone(), http.clone());
        let headers = HeaderSet::new(config.default_headers.clone());

        Self {
            config,
            http,
            master_key,
            store,
            acquirer,
            validator,
            headers,
            state: SessionState::Uninitialized,
        }
    }

    /// Load the cached token, validate it, refresh if needed
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) -> Result<()> {
        self.transition(SessionState::Loading);

        let Some(cached) = self.store.get().await else {
            info!("No cached access token, requesting a new one");
            return self.refresh().await;
        };

        if let Err(e) = self.headers.set_access_token(&cached) {
            warn!("Cached access token unusable ({}), requesting a new one", e);
            return self.refresh().await;
        }
        self.trace_headers();

        match self.validator.probe(self.headers.snapshot()).await? {
            ValidationOutcome::Ok => {
                debug!("Cached access token accepted");
                self.transition(SessionState::Valid);
                Ok(())
            }
            ValidationOutcome::Rejected(reason) => {
                warn!("Cached access token rejected: {}", reason);
                self.refresh().await
            }
        }
    }

    /// Acquire a new token from the master key, persist it and publish it
    /// to every resource client sharing this session's headers.
    ///
    /// Persistence is best effort: a failed save is logged and the session
    /// still moves to `Valid` with the new token. On failure the previous
    /// token stays published and the state falls back to `Valid`, or to
    /// `Uninitialized` when there was no token yet.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<()> {
        self.transition(SessionState::Refreshing);

        let result = self.acquire_and_publish().await;
        if result.is_err() {
            let fallback = if self.headers.access_token().is_some() {
                SessionState::Valid
            } else {
                SessionState::Uninitialized
            };
            self.transition(fallback);
        }
        result
    }

    async fn acquire_and_publish(&mut self) -> Result<()> {
        match self.acquirer.acquire(&self.master_key).await? {
            AuthOutcome::Success { access_token } => {
                if let Err(e) = self.store.put(&access_token).await {
                    warn!(
                        "Could not persist access token via {} store, continuing: {}",
                        self.store.name(),
                        e
                    );
                }

                self.headers.set_access_token(&access_token)?;
                self.trace_headers();
                self.transition(SessionState::Valid);
                info!("Access token acquired");
                Ok(())
            }
            AuthOutcome::Failure { code, message } => Err(DkcAuthError::Auth { code, message }),
        }
    }

    /// Probe the current token and refresh only if the service rejects it
    #[instrument(skip(self))]
    pub async fn ensure_valid(&mut self) -> Result<()> {
        if self.headers.access_token().is_none() {
            return self.refresh().await;
        }

        match self.validator.probe(self.headers.snapshot()).await? {
            ValidationOutcome::Ok => Ok(()),
            ValidationOutcome::Rejected(reason) => {
                warn!("Access token rejected: {}", reason);
                self.refresh().await
            }
        }
    }

    /// Read handle on the outgoing headers, for resource clients
    pub fn headers(&self) -> HeaderView {
        self.headers.view()
    }

    pub fn access_token(&self) -> Option<String> {
        self.headers.access_token()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The HTTP client this session was built with; share it with resource clients
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "Session state change");
        self.state = next;
    }

    fn trace_headers(&self) {
        if self.config.debug {
            debug!(headers = ?self.headers.view().names(), "Session headers updated");
        }
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.config.base_url.as_str())
            .field("store", &self.store.name())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
