//! Upload handlers
//!
//! `POST /upload/{kind}` plus fixed-kind aliases. All of them read the
//! multipart field `file` and hand it to [`UploadService`].

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use intake_core::{AppError, FileKind, UploadResponse};

use crate::error::HttpAppError;
use crate::services::upload::{UploadRequest, UploadService};
use crate::state::AppState;
use crate::utils::upload::{is_file_field, multipart_error, FileField};

/// Upload a file of the kind named in the path (`excel`, `image` or `video`).
///
/// # Errors
/// - `AppError::InvalidKind` - Unknown kind in the path
/// - `AppError::InvalidExtension` / `AppError::InvalidContentType` - File does not match the kind
/// - `AppError::FileTooLarge` - File exceeds the upload limit
/// - `AppError::StorageWriteFailure` / `AppError::MetadataStoreFailure` - Persistence failed
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_by_kind"))]
pub async fn upload_by_kind(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let kind: FileKind = kind.parse()?;
    upload(&state, kind, multipart).await
}

pub async fn upload_excel(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    upload(&state, FileKind::Spreadsheet, multipart).await
}

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    upload(&state, FileKind::Image, multipart).await
}

pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    upload(&state, FileKind::Video, multipart).await
}

async fn upload(
    state: &AppState,
    kind: FileKind,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let service = UploadService::new(state);
    let max_upload_mb = state.uploads.max_upload_mb;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, kind, max_upload_mb))?
    {
        if !is_file_field(&field) {
            continue;
        }

        let file = FileField::new(field);
        let response = service
            .handle_upload(UploadRequest {
                kind,
                filename: file.filename,
                content_type: file.content_type,
                body: file.reader,
            })
            .await?;

        return Ok(Json(response));
    }

    Err(AppError::InvalidInput("No file provided".to_string()).into())
}
