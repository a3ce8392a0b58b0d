//! Application state shared by all handlers.

use intake_core::Config;
use intake_db::MetadataStore;
use intake_storage::Storage;
use std::sync::Arc;

/// Collaborators of the upload pipeline.
#[derive(Clone)]
pub struct UploadState {
    pub storage: Arc<dyn Storage>,
    pub metadata: Arc<dyn MetadataStore>,
    pub max_upload_mb: u64,
}

pub struct AppState {
    pub config: Config,
    pub uploads: UploadState,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        metadata: Arc<dyn MetadataStore>,
    ) -> Self {
        let uploads = UploadState {
            storage,
            metadata,
            max_upload_mb: config.max_upload_mb(),
        };
        Self { config, uploads }
    }
}
