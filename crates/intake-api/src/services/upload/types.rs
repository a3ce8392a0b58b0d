//! Types used by the upload service

use intake_core::FileKind;
use std::path::PathBuf;

/// One upload as received from the client.
///
/// `body` is read at most once, and never past the size limit.
pub struct UploadRequest<R> {
    pub kind: FileKind,
    /// Filename exactly as the client sent it.
    pub filename: String,
    /// Declared content type, trusted as sent.
    pub content_type: String,
    pub body: R,
}

/// Request values that passed every check that does not need the bytes.
pub(super) struct ValidatedUpload {
    pub kind: FileKind,
    /// Normalized (final component, lowercase) filename.
    pub filename: String,
    pub content_type: String,
}

/// Where a persisted upload ended up.
pub(super) struct StoredUpload {
    pub record: intake_core::FileMetadataRecord,
    pub path: PathBuf,
}
