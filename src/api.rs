use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use dkc_auth::{
    ApiConfig, FileTokenStore, HttpTimeouts, MasterKey, SessionManager, SessionState, TokenStore,
};
use dkc_resources::{Catalog, Content, Delivery, News, RestClient};

use crate::error::Result;

/// Authenticated entry point to the DKC API.
///
/// Owns the token session and one client per resource group. All resource
/// clients read the session's headers, so [`DkcApi::refresh_token`] takes
/// effect on their next request.
#[derive(Debug)]
pub struct DkcApi {
    session: SessionManager,
    catalog: Catalog,
    news: News,
    content: Content,
    delivery: Delivery,
}

impl DkcApi {
    pub fn builder(master_key: impl Into<MasterKey>) -> DkcApiBuilder {
        DkcApiBuilder::new(master_key.into())
    }

    /// Connect with every setting at its default
    pub async fn connect(master_key: impl Into<MasterKey>) -> Result<Self> {
        Self::builder(master_key).build().await
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn news(&self) -> &News {
        &self.news
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.access_token()
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Acquire a new token from the master key unconditionally
    pub async fn refresh_token(&mut self) -> Result<()> {
        self.session.refresh().await?;
        Ok(())
    }

    /// Probe the current token and refresh it if the API rejects it
    pub async fn ensure_valid(&mut self) -> Result<()> {
        self.session.ensure_valid().await?;
        Ok(())
    }
}

/// Builder for [`DkcApi`]
pub struct DkcApiBuilder {
    master_key: MasterKey,
    base_url: Option<String>,
    default_headers: Vec<(String, String)>,
    storage: Option<Arc<dyn TokenStore>>,
    timeouts: Option<HttpTimeouts>,
    user_agent: Option<String>,
    http_client: Option<reqwest::Client>,
    debug: bool,
}

impl DkcApiBuilder {
    fn new(master_key: MasterKey) -> Self {
        Self {
            master_key,
            base_url: None,
            default_headers: Vec::new(),
            storage: None,
            timeouts: None,
            user_agent: None,
            http_client: None,
            debug: false,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Extra header sent with every request. Replaces the built-in
    /// `Accept: application/json` when the name matches.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Token cache backend; defaults to `access_token.json` in the working directory
    pub fn storage(mut self, storage: Arc<dyn TokenStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// File token cache at `dir/file_name`
    pub fn token_file(self, dir: impl AsRef<Path>, file_name: &str) -> Self {
        self.storage(Arc::new(FileTokenStore::new(dir, file_name)))
    }

    pub fn timeouts(mut self, timeouts: HttpTimeouts) -> Self {
        self.timeouts = Some(timeouts);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a preconfigured reqwest client; timeouts and user agent are then ignored
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Trace outgoing header names and request URLs at debug level
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    fn config(&self) -> Result<ApiConfig> {
        let mut config = match &self.base_url {
            Some(url) => ApiConfig::with_base_url(url)?,
            None => ApiConfig::default(),
        };
        for (name, value) in &self.default_headers {
            config.insert_default_header(name, value)?;
        }
        if let Some(timeouts) = &self.timeouts {
            config.http_timeouts = timeouts.clone();
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = Some(user_agent.clone());
        }
        config.debug = self.debug;
        Ok(config)
    }

    /// Run the token lifecycle and wire the resource clients to the session
    pub async fn build(self) -> Result<DkcApi> {
        let config = self.config()?;
        let store: Arc<dyn TokenStore> = match self.storage {
            Some(store) => store,
            None => Arc::new(FileTokenStore::in_current_dir()),
        };

        let session = match self.http_client {
            Some(http) => {
                let mut session = SessionManager::with_client(config, http, self.master_key, store);
                session.initialize().await?;
                session
            }
            None => SessionManager::connect(config, self.master_key, store).await?,
        };

        let client = RestClient::new(
            session.http_client().clone(),
            session.config().clone(),
            session.headers(),
        );

        info!(base_url = %session.config().base_url, "DKC API client ready");
        Ok(DkcApi {
            catalog: Catalog::new(client.clone()),
            news: News::new(client.clone()),
            content: Content::new(client.clone()),
            delivery: Delivery::new(client),
            session,
        })
    }
}

impl fmt::Debug for DkcApiBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DkcApiBuilder")
            .field("master_key", &self.master_key)
            .field("base_url", &self.base_url)
            .field("storage", &self.storage.as_ref().map(|s| s.name()))
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
