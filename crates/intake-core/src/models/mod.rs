//! Domain models

pub mod file_kind;
pub mod file_metadata;

pub use file_kind::FileKind;
pub use file_metadata::{FileMetadataRecord, NewFileMetadata, PreviewData, UploadResponse};
