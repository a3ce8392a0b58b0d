//! Storage abstraction trait
//!
//! This module defines the Storage trait that the upload pipeline writes through.

use async_trait::async_trait;
use intake_core::{AppError, FileKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidFilename(msg) => AppError::InvalidFilename(msg),
            other => AppError::StorageWriteFailure(other.to_string()),
        }
    }
}

/// A fully written file waiting to be promoted to its final name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub kind: FileKind,
    pub temp_path: PathBuf,
    pub final_path: PathBuf,
    pub size_bytes: u64,
}

impl StagedFile {
    /// Final path as recorded in metadata.
    pub fn saved_path(&self) -> String {
        self.final_path.display().to_string()
    }
}

/// Storage abstraction trait
///
/// Writes are two-phase: [`Storage::stage`] puts the bytes on disk under a
/// temporary name, then [`Storage::promote`] moves them to the final path or
/// [`Storage::discard`] drops them. Promotion replaces any existing file with
/// the same name.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create every kind directory. Called once before the service accepts
    /// uploads.
    async fn bootstrap(&self) -> StorageResult<()>;

    /// Final path a file named `filename` of `kind` is stored at.
    fn path_for(&self, kind: FileKind, filename: &str) -> StorageResult<PathBuf>;

    /// Write `data` verbatim to a staging file next to its final path.
    async fn stage(&self, kind: FileKind, filename: &str, data: &[u8])
        -> StorageResult<StagedFile>;

    /// Atomically move a staged file to its final path.
    async fn promote(&self, staged: &StagedFile) -> StorageResult<PathBuf>;

    /// Remove a staged file that will not be promoted. Missing files are ignored.
    async fn discard(&self, staged: &StagedFile) -> StorageResult<()>;

    /// Remove a stored file. Missing files are ignored.
    async fn remove(&self, path: &Path) -> StorageResult<()>;

    /// Check that every kind directory exists and is a directory.
    async fn check_ready(&self) -> StorageResult<()>;
}
