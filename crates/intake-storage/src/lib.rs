//! Intake Storage Library
//!
//! This crate provides the storage abstraction used by the upload pipeline and
//! its local filesystem implementation.
//!
//! # Layout
//!
//! Every file kind has its own directory (see `UploadConfig`). A stored file
//! lives at `{kind_dir}/{filename}` where `filename` is already normalized.
//! Writes are staged as a hidden temp file in the same directory and promoted
//! by rename, so a file only appears under its final name once the caller
//! decides to keep it.

pub mod local;
pub(crate) mod paths;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{StagedFile, Storage, StorageError, StorageResult};
