use serde::{Deserialize, Serialize};

use crate::constants::BYTES_PER_KB;
use crate::models::FileKind;

/// Leading rows of a spreadsheet's first worksheet, raw cell values only.
pub type PreviewData = Vec<Vec<serde_json::Value>>;

/// Persisted metadata for one accepted upload.
///
/// Rows are created once and never updated. The same filename may appear in
/// several rows when a file was uploaded more than once; all of them point at
/// the same path, which holds the most recent bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadataRecord {
    pub id: i64,
    pub filename: String,
    pub file_type: FileKind,
    pub mime_type: String,
    pub size_kb: f64,
    pub saved_path: String,
}

/// Insert payload for [`FileMetadataRecord`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFileMetadata {
    pub filename: String,
    pub file_type: FileKind,
    pub mime_type: String,
    pub size_kb: f64,
    pub saved_path: String,
}

impl NewFileMetadata {
    pub fn new(
        filename: impl Into<String>,
        file_type: FileKind,
        mime_type: impl Into<String>,
        size_bytes: u64,
        saved_path: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            file_type,
            mime_type: mime_type.into(),
            size_kb: size_kb_from_bytes(size_bytes),
            saved_path: saved_path.into(),
        }
    }

    pub fn into_record(self, id: i64) -> FileMetadataRecord {
        FileMetadataRecord {
            id,
            filename: self.filename,
            file_type: self.file_type,
            mime_type: self.mime_type,
            size_kb: self.size_kb,
            saved_path: self.saved_path,
        }
    }
}

/// Smallest size recorded for a non-empty file.
const MIN_SIZE_KB: f64 = 0.01;

/// Size in kilobytes rounded to two decimals.
///
/// A non-empty file never rounds down to zero; anything under 6 bytes is
/// recorded as 0.01 KB.
pub fn size_kb_from_bytes(size_bytes: u64) -> f64 {
    let kb = size_bytes as f64 / BYTES_PER_KB;
    let rounded = (kb * 100.0).round() / 100.0;
    if size_bytes > 0 && rounded < MIN_SIZE_KB {
        MIN_SIZE_KB
    } else {
        rounded
    }
}

/// Response body for a successful upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub id: i64,
    pub filename: String,
    #[serde(rename = "type")]
    pub file_type: FileKind,
    #[serde(rename = "mime")]
    pub mime_type: String,
    pub size_kb: f64,
    #[serde(rename = "saved_to")]
    pub saved_path: String,
    /// Absent for kinds without a preview; `Some(None)` renders as `null`
    /// when the preview could not be extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_data: Option<Option<PreviewData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl UploadResponse {
    pub fn with_preview(mut self, rows: PreviewData) -> Self {
        self.preview_data = Some(Some(rows));
        self
    }

    pub fn with_failed_preview(mut self, warning: impl Into<String>) -> Self {
        self.preview_data = Some(None);
        self.warning = Some(warning.into());
        self
    }
}

impl From<FileMetadataRecord> for UploadResponse {
    fn from(record: FileMetadataRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            file_type: record.file_type,
            mime_type: record.mime_type,
            size_kb: record.size_kb,
            saved_path: record.saved_path,
            preview_data: None,
            warning: None,
        }
    }
}
