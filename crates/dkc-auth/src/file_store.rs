use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, instrument};

use crate::config::DEFAULT_TOKEN_FILE;
use crate::errors::StorageError;
use crate::store::{StoredToken, TokenRecord, TokenStore};

/// File-based token store
///
/// Keeps one JSON record per file:
///
/// ```text
/// {"time_update": "2026-10-17T21:04:11.520391+03:00", "access_token": "..."}
/// ```
///
/// Every save replaces the whole file (temp file, fsync, rename). There is no
/// locking: when two processes share one file the last writer wins.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at `dir/file_name`
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: dir.as_ref().join(file_name),
        }
    }

    /// `access_token.json` in the current working directory, resolved now
    pub fn in_current_dir() -> Self {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(dir, DEFAULT_TOKEN_FILE)
    }

    /// `access_token.json` in the platform config directory
    pub fn in_config_dir() -> Result<Self, StorageError> {
        let project_dirs = directories::ProjectDirs::from("ru", "dkc", "dkc-api").ok_or_else(|| {
            StorageError::Unavailable("Could not determine config directory".to_string())
        })?;

        Ok(Self::new(project_dirs.config_dir(), DEFAULT_TOKEN_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full record, if the file holds a well-formed one
    pub async fn record(&self) -> Option<TokenRecord> {
        let content = fs::read_to_string(&self.path).await.ok()?;
        serde_json::from_str(&content).ok()
    }

    async fn write_record(&self, record: &TokenRecord) -> Result<(), StorageError> {
        let contents = serde_json::to_string(record)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create token directory")
                .map_err(|e| self.io_error(e))?;
        }

        // Atomic write: owner-only temp file, fsync, then rename over the target
        let temp_path = self.path.with_extension("tmp");
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&temp_path)
            .await
            .context("Failed to create temporary token file")
            .map_err(|e| self.io_error(e))?;

        // mode() only applies on creation; a leftover temp file keeps its old bits
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .await
                .context("Failed to restrict temporary token file permissions")
                .map_err(|e| self.io_error(e))?;
        }

        file.write_all(contents.as_bytes())
            .await
            .context("Failed to write temporary token file")
            .map_err(|e| self.io_error(e))?;
        file.sync_all()
            .await
            .context("Failed to sync temporary token file")
            .map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(&temp_path, &self.path)
            .await
            .context("Failed to move token file into place")
            .map_err(|e| self.io_error(e))?;

        Ok(())
    }

    fn io_error(&self, source: anyhow::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait::async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self) -> Option<String> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                debug!("No readable token file at {}: {}", self.path.display(), e);
                return None;
            }
        };

        let token = StoredToken::parse(&content);
        if token.is_none() {
            debug!(
                "Token file {} has no usable access_token, ignoring it",
                self.path.display()
            );
        }
        token
    }

    #[instrument(skip(self, access_token), fields(path = %self.path.display()), level = "debug")]
    async fn put(&self, access_token: &str) -> Result<(), StorageError> {
        let record = TokenRecord::new(access_token);

        self.write_record(&record).await.map_err(|e| {
            error!("Failed to save access token to {}: {}", self.path.display(), e);
            e
        })?;

        debug!("Access token saved to {}", self.path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
