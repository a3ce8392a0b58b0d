use crate::paths::{final_path, is_plain_filename, staging_path};
use crate::traits::{StagedFile, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use intake_core::{FileKind, UploadConfig};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    dirs: UploadConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage over the configured kind directories.
    ///
    /// Directories are not touched here; call [`Storage::bootstrap`] during
    /// startup.
    pub fn new(dirs: UploadConfig) -> Self {
        LocalStorage { dirs }
    }

    fn kind_dir(&self, kind: FileKind) -> &Path {
        self.dirs.dir_for(kind)
    }

    async fn remove_if_exists(path: &Path) -> StorageResult<bool> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn bootstrap(&self) -> StorageResult<()> {
        for kind in FileKind::ALL {
            let dir = self.kind_dir(kind);
            fs::create_dir_all(dir).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            tracing::info!(kind = %kind, dir = %dir.display(), "Upload directory ready");
        }
        Ok(())
    }

    fn path_for(&self, kind: FileKind, filename: &str) -> StorageResult<PathBuf> {
        if !is_plain_filename(filename) {
            return Err(StorageError::InvalidFilename(format!(
                "'{}' is not a plain file name",
                filename
            )));
        }
        Ok(final_path(self.kind_dir(kind), filename))
    }

    async fn stage(
        &self,
        kind: FileKind,
        filename: &str,
        data: &[u8],
    ) -> StorageResult<StagedFile> {
        let final_path = self.path_for(kind, filename)?;
        let temp_path = staging_path(self.kind_dir(kind));
        let start = std::time::Instant::now();

        let write = async {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to create file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(data).await.map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to write file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.sync_all().await.map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to sync file {}: {}",
                    temp_path.display(),
                    e
                ))
            })
        };

        if let Err(e) = write.await {
            // A partially written staging file must not outlive the request.
            if let Err(cleanup_err) = Self::remove_if_exists(&temp_path).await {
                tracing::warn!(
                    error = %cleanup_err,
                    path = %temp_path.display(),
                    "Failed to remove partial staging file"
                );
            }
            return Err(e);
        }

        tracing::debug!(
            path = %temp_path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Staged upload on local storage"
        );

        Ok(StagedFile {
            kind,
            temp_path,
            final_path,
            size_bytes: data.len() as u64,
        })
    }

    async fn promote(&self, staged: &StagedFile) -> StorageResult<PathBuf> {
        fs::rename(&staged.temp_path, &staged.final_path)
            .await
            .map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to move {} to {}: {}",
                    staged.temp_path.display(),
                    staged.final_path.display(),
                    e
                ))
            })?;

        tracing::info!(
            path = %staged.final_path.display(),
            kind = %staged.kind,
            size_bytes = staged.size_bytes,
            "Local storage write successful"
        );

        Ok(staged.final_path.clone())
    }

    async fn discard(&self, staged: &StagedFile) -> StorageResult<()> {
        if Self::remove_if_exists(&staged.temp_path).await? {
            tracing::debug!(path = %staged.temp_path.display(), "Discarded staged upload");
        }
        Ok(())
    }

    async fn remove(&self, path: &Path) -> StorageResult<()> {
        if Self::remove_if_exists(path).await? {
            tracing::info!(path = %path.display(), "Local storage delete successful");
        }
        Ok(())
    }

    async fn check_ready(&self) -> StorageResult<()> {
        for kind in FileKind::ALL {
            let dir = self.kind_dir(kind);
            let meta = fs::metadata(dir).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Upload directory {} unavailable: {}",
                    dir.display(),
                    e
                ))
            })?;
            if !meta.is_dir() {
                return Err(StorageError::ConfigError(format!(
                    "Upload path {} is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
