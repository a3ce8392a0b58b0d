//! Common utilities for file upload handlers

use std::io;
use std::pin::Pin;

use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use intake_core::constants::FALLBACK_CONTENT_TYPE;
use intake_core::validation::max_upload_bytes;
use intake_core::{AppError, FileKind};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::io::StreamReader;

/// Name of the multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

type ByteStream<'a> = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + 'a>>;

/// Body of a multipart file field as an `AsyncRead`.
pub type FieldReader<'a> = StreamReader<ByteStream<'a>, Bytes>;

/// The `file` field of a multipart form, not yet read.
pub struct FileField<'a> {
    pub filename: String,
    pub content_type: String,
    pub reader: FieldReader<'a>,
}

impl<'a> FileField<'a> {
    /// Take the declared name and type of `field` and wrap its body.
    ///
    /// The body is left unread so the declared values can be validated
    /// before any bytes are consumed. A part without a content type is
    /// treated as `application/octet-stream`.
    pub fn new(field: Field<'a>) -> Self {
        let filename = field.file_name().map(str::to_string).unwrap_or_default();
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        let stream: ByteStream<'a> = Box::pin(field.map_err(io::Error::other));

        Self {
            filename,
            content_type,
            reader: StreamReader::new(stream),
        }
    }
}

/// Whether `field` is the one carrying the file.
pub fn is_file_field(field: &Field<'_>) -> bool {
    field.name() == Some(FILE_FIELD)
}

/// Map a multipart error for an upload of `kind`.
///
/// A body cut off by the request size limit is reported as
/// [`AppError::FileTooLarge`] like any other oversized upload; everything else
/// is a malformed request.
pub fn multipart_error(err: MultipartError, kind: FileKind, max_upload_mb: u64) -> AppError {
    if is_length_limit(&err) {
        return AppError::FileTooLarge {
            limit_mb: max_upload_mb,
            kind,
        };
    }
    AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
}

fn is_length_limit(err: &MultipartError) -> bool {
    err.status() == StatusCode::PAYLOAD_TOO_LARGE
}

/// Read `reader` to the end, stopping one byte past the upload limit.
///
/// The caller compares the returned length with the limit; a result longer
/// than the limit means the upload is too large. A read error (client
/// disconnect, malformed body) aborts the upload, unless it is the request
/// size limit tripping inside a [`FieldReader`].
pub async fn read_to_limit<R>(
    reader: R,
    kind: FileKind,
    max_upload_mb: u64,
) -> Result<Vec<u8>, AppError>
where
    R: AsyncRead + Unpin,
{
    let limit = max_upload_bytes(max_upload_mb);
    let mut data = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut data)
        .await
        .map_err(|e| {
            let hit_body_limit = e
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<MultipartError>())
                .is_some_and(is_length_limit);
            if hit_body_limit {
                AppError::FileTooLarge {
                    limit_mb: max_upload_mb,
                    kind,
                }
            } else {
                AppError::UploadAborted(format!("Failed to read file data: {}", e))
            }
        })?;
    Ok(data)
}
