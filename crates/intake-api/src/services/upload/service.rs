//! Upload pipeline
//!
//! validate name and type → read within the size limit → stage on disk →
//! insert metadata and promote the staged file in one transaction → preview.
//!
//! Every check that can reject an upload runs before anything touches disk.
//! Once bytes are staged, either the row commits with the file in place or
//! neither is left behind.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use intake_core::constants::PREVIEW_ROW_LIMIT;
use intake_core::validation::{
    normalize_filename, validate_content_type, validate_extension, validate_file_size,
};
use intake_core::{AppError, ErrorMetadata, NewFileMetadata, UploadResponse};
use intake_db::{CommitHook, MetadataStore};
use intake_processing::read_preview;
use intake_storage::{StagedFile, Storage};
use tokio::io::AsyncRead;

use crate::state::AppState;
use crate::utils::upload::read_to_limit;

use super::types::{StoredUpload, UploadRequest, ValidatedUpload};

pub struct UploadService {
    storage: Arc<dyn Storage>,
    metadata: Arc<dyn MetadataStore>,
    max_upload_mb: u64,
}

impl UploadService {
    pub fn new(state: &AppState) -> Self {
        Self {
            storage: state.uploads.storage.clone(),
            metadata: state.uploads.metadata.clone(),
            max_upload_mb: state.uploads.max_upload_mb,
        }
    }

    /// Run one upload through the whole pipeline.
    ///
    /// Validation failures are client errors and have no side effects. A
    /// preview failure does not fail the upload: the committed metadata is
    /// returned with `preview_data: null` and a warning.
    #[tracing::instrument(
        skip(self, request),
        fields(
            kind = %request.kind,
            filename = %request.filename,
            content_type = %request.content_type,
            operation = "upload"
        )
    )]
    pub async fn handle_upload<R>(
        &self,
        request: UploadRequest<R>,
    ) -> Result<UploadResponse, AppError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let upload = validate_request(&request)?;

        let data = read_to_limit(request.body, upload.kind, self.max_upload_mb).await?;
        validate_file_size(upload.kind, data.len() as u64, self.max_upload_mb)?;

        let stored = self.persist(&upload, data).await?;
        let response = UploadResponse::from(stored.record);

        if upload.kind.has_preview() {
            Ok(attach_preview(response, stored.path).await)
        } else {
            Ok(response)
        }
    }

    async fn persist(
        &self,
        upload: &ValidatedUpload,
        data: Vec<u8>,
    ) -> Result<StoredUpload, AppError> {
        let staged = self
            .storage
            .stage(upload.kind, &upload.filename, &data)
            .await?;
        drop(data);

        let new = NewFileMetadata::new(
            upload.filename.as_str(),
            upload.kind,
            upload.content_type.as_str(),
            staged.size_bytes,
            staged.saved_path(),
        );

        let promoted = Arc::new(AtomicBool::new(false));
        let hook = promote_hook(self.storage.clone(), staged.clone(), promoted.clone());

        match self.metadata.insert(new, hook).await {
            Ok(record) => {
                tracing::info!(
                    id = record.id,
                    path = %record.saved_path,
                    size_kb = record.size_kb,
                    "Upload stored"
                );
                Ok(StoredUpload {
                    record,
                    path: staged.final_path,
                })
            }
            Err(e) => {
                self.clean_up(&staged, promoted.load(Ordering::SeqCst)).await;
                Err(e)
            }
        }
    }

    /// Remove whatever a failed insert left on disk.
    ///
    /// Before promotion that is the staged file. After promotion (the commit
    /// itself failed) it is the file at the final path.
    async fn clean_up(&self, staged: &StagedFile, promoted: bool) {
        let result = if promoted {
            self.storage.remove(&staged.final_path).await
        } else {
            self.storage.discard(staged).await
        };

        if let Err(e) = result {
            tracing::warn!(
                error = %e,
                path = %staged.final_path.display(),
                promoted,
                "Failed to clean up after a failed upload"
            );
        }
    }
}

fn validate_request<R>(request: &UploadRequest<R>) -> Result<ValidatedUpload, AppError> {
    let filename = normalize_filename(&request.filename)?;
    validate_extension(request.kind, &filename)?;
    validate_content_type(request.kind, &request.content_type)?;

    Ok(ValidatedUpload {
        kind: request.kind,
        filename,
        content_type: request.content_type.clone(),
    })
}

/// Move the staged file into place as the last step before commit.
fn promote_hook(
    storage: Arc<dyn Storage>,
    staged: StagedFile,
    promoted: Arc<AtomicBool>,
) -> CommitHook {
    Box::new(move || {
        async move {
            storage.promote(&staged).await?;
            promoted.store(true, Ordering::SeqCst);
            Ok::<(), AppError>(())
        }
        .boxed()
    })
}

async fn attach_preview(response: UploadResponse, path: PathBuf) -> UploadResponse {
    match read_preview(path, PREVIEW_ROW_LIMIT).await {
        Ok(rows) => response.with_preview(rows),
        Err(e) => {
            let err = AppError::from(e);
            tracing::warn!(
                id = response.id,
                error = %err,
                "Spreadsheet preview failed, returning metadata without it"
            );
            response.with_failed_preview(err.client_message())
        }
    }
}
