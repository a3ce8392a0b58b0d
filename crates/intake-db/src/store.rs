//! Metadata store abstraction
//!
//! The upload pipeline records metadata through [`MetadataStore`] so the
//! Postgres repository can be swapped for [`crate::InMemoryMetadataStore`] in
//! tests.

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use intake_core::{AppError, FileMetadataRecord, NewFileMetadata};

/// Work that must succeed before an inserted row is committed.
///
/// The upload service uses it to move the staged file into place, so a row
/// is only ever visible alongside its file.
pub type CommitHook = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), AppError>> + Send>;

/// A hook that does nothing.
pub fn no_commit_hook() -> CommitHook {
    Box::new(|| async { Ok::<(), AppError>(()) }.boxed())
}

#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert a new row and return it with its assigned id.
    ///
    /// `before_commit` runs after the insert and before the commit. If either
    /// fails nothing is persisted and the error is returned.
    async fn insert(
        &self,
        new: NewFileMetadata,
        before_commit: CommitHook,
    ) -> Result<FileMetadataRecord, AppError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}
