//! File metadata repository: inserts and lookups for the file_metadata table.

use async_trait::async_trait;
use futures::FutureExt;
use intake_core::{AppError, FileKind, FileMetadataRecord, NewFileMetadata};
use sqlx::{PgPool, Postgres, Transaction};

use crate::db::transaction::with_transaction;
use crate::store::{CommitHook, MetadataStore};

/// Row type for file_metadata table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct FileMetadataRow {
    pub id: i64,
    pub filename: String,
    pub file_type: String,
    pub mime_type: String,
    pub size_kb: f64,
    pub saved_path: String,
}

impl FileMetadataRow {
    pub fn into_record(self) -> Result<FileMetadataRecord, AppError> {
        let file_type: FileKind = self.file_type.parse().map_err(|_| {
            AppError::MetadataStoreFailure(format!(
                "Row {} has unknown file_type '{}'",
                self.id, self.file_type
            ))
        })?;

        Ok(FileMetadataRecord {
            id: self.id,
            filename: self.filename,
            file_type,
            mime_type: self.mime_type,
            size_kb: self.size_kb,
            saved_path: self.saved_path,
        })
    }
}

/// Repository for file_metadata table.
#[derive(Clone)]
pub struct FileMetadataRepository {
    pool: PgPool,
}

impl FileMetadataRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a row within a transaction.
    #[tracing::instrument(skip(tx, new), fields(db.table = "file_metadata", filename = %new.filename))]
    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        new: &NewFileMetadata,
    ) -> Result<FileMetadataRecord, AppError> {
        let row: FileMetadataRow = sqlx::query_as::<Postgres, FileMetadataRow>(
            r#"
            INSERT INTO file_metadata (filename, file_type, mime_type, size_kb, saved_path)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, filename, file_type, mime_type, size_kb, saved_path
            "#,
        )
        .bind(&new.filename)
        .bind(new.file_type.as_str())
        .bind(&new.mime_type)
        .bind(new.size_kb)
        .bind(&new.saved_path)
        .fetch_one(&mut **tx)
        .await?;

        row.into_record()
    }

    /// All rows recorded for a filename, oldest first.
    #[tracing::instrument(skip(self), fields(db.table = "file_metadata"))]
    pub async fn find_by_filename(
        &self,
        filename: &str,
    ) -> Result<Vec<FileMetadataRecord>, AppError> {
        let rows: Vec<FileMetadataRow> = sqlx::query_as::<Postgres, FileMetadataRow>(
            r#"
            SELECT id, filename, file_type, mime_type, size_kb, saved_path
            FROM file_metadata
            WHERE filename = $1
            ORDER BY id
            "#,
        )
        .bind(filename)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(FileMetadataRow::into_record).collect()
    }
}

#[async_trait]
impl MetadataStore for FileMetadataRepository {
    #[tracing::instrument(skip(self, new, before_commit), fields(db.table = "file_metadata", filename = %new.filename))]
    async fn insert(
        &self,
        new: NewFileMetadata,
        before_commit: CommitHook,
    ) -> Result<FileMetadataRecord, AppError> {
        let record = with_transaction(&self.pool, move |tx| {
            async move {
                let record = Self::insert_tx(tx, &new).await?;
                before_commit().await?;
                Ok(record)
            }
            .boxed()
        })
        .await?;

        tracing::debug!(id = record.id, "File metadata recorded");
        Ok(record)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
