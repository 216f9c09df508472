//! Filesystem-backed blob store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use super::{image_extension, object_name, BlobStore, StoredBlob};
use crate::error::{DsError, Result};

/// Writes objects into a directory served under `public_prefix`
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_prefix, path)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(
        &self,
        file_name: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<StoredBlob> {
        let extension = image_extension(content_type)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DsError::Storage(format!("cannot create {}: {}", self.root.display(), e)))?;

        let path = object_name(extension);
        let target = self.root.join(&path);
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| DsError::Storage(format!("cannot write {}: {}", target.display(), e)))?;

        info!("Uploaded {} ({} bytes) as {}", file_name, bytes.len(), path);
        Ok(StoredBlob {
            public_url: self.public_url(&path),
            path,
        })
    }
}
