use tracing::instrument;

use crate::client::RestClient;
use crate::error::{ResourceError, Result};
use crate::models::news::*;
use crate::response::ApiResponse;

/// Page selector for the news feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub index: u32,
    pub length: u32,
}

impl Page {
    pub fn new(index: u32, length: u32) -> Self {
        Self { index, length }
    }

    fn to_query(self) -> Result<Vec<(&'static str, String)>> {
        if self.length == 0 {
            return Err(ResourceError::invalid("length", "page length must be positive"));
        }
        Ok(vec![
            ("page_index", self.index.to_string()),
            ("length", self.length.to_string()),
        ])
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            index: 0,
            length: 10,
        }
    }
}

/// Company, community and product news feeds
#[derive(Debug, Clone)]
pub struct News {
    client: RestClient,
}

impl News {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get_news_company(&self, page: Page) -> Result<ApiResponse<GetNewsCompany>> {
        let query = page.to_query()?;
        self.client.get(&["news", "company"], &query).await
    }

    #[instrument(skip(self))]
    pub async fn get_news_community(&self, page: Page) -> Result<ApiResponse<GetNewsCommunity>> {
        let query = page.to_query()?;
        self.client.get(&["news", "community"], &query).await
    }

    #[instrument(skip(self))]
    pub async fn get_news_products(&self, page: Page) -> Result<ApiResponse<GetNewsProducts>> {
        let query = page.to_query()?;
        self.client.get(&["news", "products"], &query).await
    }
}
