//! In-memory metadata store
//!
//! Keeps rows in a `Vec` behind a mutex. Used by tests that exercise the
//! upload pipeline without a database.

use async_trait::async_trait;
use intake_core::{AppError, FileMetadataRecord, NewFileMetadata};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::store::{CommitHook, MetadataStore};

#[derive(Clone, Default)]
pub struct InMemoryMetadataStore {
    records: Arc<Mutex<Vec<FileMetadataRecord>>>,
    next_id: Arc<AtomicI64>,
    failing: Arc<AtomicBool>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert and ping fail with
    /// [`AppError::MetadataStoreFailure`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of all committed rows in insertion order.
    pub fn records(&self) -> Vec<FileMetadataRecord> {
        self.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<FileMetadataRecord>>, AppError> {
        self.records
            .lock()
            .map_err(|_| AppError::Internal("Metadata store lock poisoned".to_string()))
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::MetadataStoreFailure(
                "In-memory store is unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn insert(
        &self,
        new: NewFileMetadata,
        before_commit: CommitHook,
    ) -> Result<FileMetadataRecord, AppError> {
        self.check_available()?;

        // Like a sequence, an id is consumed even when the insert is rolled back.
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        before_commit().await?;

        let record = new.into_record(id);
        self.lock()?.push(record.clone());
        Ok(record)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}
