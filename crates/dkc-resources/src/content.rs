use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::client::RestClient;
use crate::error::{ResourceError, Result};
use crate::models::content::*;
use crate::response::ApiResponse;

/// Revision feeds for offline mirrors, plus file upload and download
#[derive(Debug, Clone)]
pub struct Content {
    client: RestClient,
}

/// `None` asks for a full snapshot
fn since_query(last_updated: Option<DateTime<Utc>>) -> Vec<(&'static str, String)> {
    match last_updated {
        Some(at) => vec![("last_updated", at.timestamp().to_string())],
        None => Vec::new(),
    }
}

impl Content {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    async fn revision<T: serde::de::DeserializeOwned>(
        &self,
        segments: &[&str],
        last_updated: Option<DateTime<Utc>>,
    ) -> Result<ApiResponse<T>> {
        let query = since_query(last_updated);
        debug!(?query, "Revision window");
        self.client.get(segments, &query).await
    }

    /// Size of the pending update and whether a full reload is forced
    #[instrument(skip(self))]
    pub async fn get_revisions_last_size(
        &self,
        last_updated: Option<DateTime<Utc>>,
    ) -> Result<ApiResponse<GetRevisionLastSize>> {
        self.revision(&["revisions", "last", "size"], last_updated)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_revisions_last(
        &self,
        last_updated: Option<DateTime<Utc>>,
    ) -> Result<ApiResponse<GetRevisionLast>> {
        self.revision(&["revisions", "last"], last_updated).await
    }

    #[instrument(skip(self))]
    pub async fn get_revision_drawings(
        &self,
        last_updated: Option<DateTime<Utc>>,
    ) -> Result<ApiResponse<GetRevisionDrawings>> {
        self.revision(&["revisions", "drawings"], last_updated).await
    }

    #[instrument(skip(self))]
    pub async fn get_revision_certificates(
        &self,
        last_updated: Option<DateTime<Utc>>,
    ) -> Result<ApiResponse<GetRevisionCertificates>> {
        self.revision(&["revisions", "certificates"], last_updated)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_revision_materials(
        &self,
        last_updated: Option<DateTime<Utc>>,
    ) -> Result<ApiResponse<GetRevisionMaterials>> {
        self.revision(&["revisions", "materials"], last_updated)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_file(&self, file_id: i64) -> Result<ApiResponse<GetFile>> {
        self.client
            .get(&["file"], &[("id", file_id.to_string())])
            .await
    }

    /// Upload a file; the payload is not logged
    #[instrument(skip(self, file), fields(name = %file.name))]
    pub async fn post_file(&self, file: &PostFileContent) -> Result<ApiResponse<PostFile>> {
        if file.name.trim().is_empty() {
            return Err(ResourceError::invalid("name", "file name must not be empty"));
        }
        self.client.post_form(&["file"], file).await
    }
}
