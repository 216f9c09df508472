//! Shared application state handed to every route

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{ConfiguredAdmins, IdentityProvider, SessionIssuer};
use crate::config::AppConfig;
use crate::database::ComponentStore;
use crate::error::Result;
use crate::services::CatalogService;
use crate::storage::{BlobStore, LocalBlobStore};
use crate::ui::PageRenderer;

/// Where uploads go and how large they may be
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub public_path: String,
    pub max_bytes: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub blobs: Arc<dyn BlobStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub sessions: Arc<SessionIssuer>,
    pub pages: Arc<PageRenderer>,
    pub uploads: UploadSettings,
}

impl AppState {
    /// Wire the default collaborators for `config` around `store`
    pub fn new(config: &AppConfig, store: Arc<dyn ComponentStore>) -> Result<Self> {
        let uploads = UploadSettings {
            dir: config.upload_dir.clone(),
            public_path: config.public_upload_path.clone(),
            max_bytes: config.max_upload_bytes,
        };
        let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(
            uploads.dir.clone(),
            uploads.public_path.clone(),
        ));

        Ok(Self {
            catalog: Arc::new(CatalogService::new(store, config.cache_ttl)),
            blobs,
            identity: Arc::new(ConfiguredAdmins::new(config.admins.clone())),
            sessions: Arc::new(SessionIssuer::new(
                config.jwt_secret.as_bytes(),
                config.session_ttl,
            )),
            pages: Arc::new(PageRenderer::new()?),
            uploads,
        })
    }

    /// Swap the blob store, e.g. for an object-storage backend
    pub fn with_blob_store(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.blobs = blobs;
        self
    }

    /// Swap the identity provider
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }
}
