//! Typed async client for the DKC API
//!
//! [`DkcApi`] exchanges a master key for an access token, caches it, and hands
//! out the catalog, news, content and delivery clients.
//!
//! ```no_run
//! use dkc_api::{DkcApi, Page};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = DkcApi::builder("xxxxxxxxxx")
//!         .token_file(".", "access_token.json")
//!         .build()
//!         .await?;
//!
//!     let news = api.news().get_news_company(Page::default()).await?;
//!     if let Some(feed) = news.success() {
//!         for item in feed.news {
//!             println!("{}", item.title);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod error;

pub use api::{DkcApi, DkcApiBuilder};
pub use error::{Error, Result};

pub use dkc_auth::{
    ApiConfig, DkcAuthError, FileTokenStore, HttpTimeouts, MasterKey, MemoryTokenStore,
    SessionManager, SessionState, StorageError, TokenStore,
};
pub use dkc_resources::{
    ApiResponse, Catalog, Content, Delivery, News, Page, ResourceError, ResponseError,
    ResponseErrorAlternative, StockQuery, models,
};
