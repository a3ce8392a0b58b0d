//! Storage setup and initialization

use anyhow::{Context, Result};
use intake_core::Config;
use intake_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Create local storage over the configured kind directories and make sure
/// they exist.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing local storage...");
    let storage = LocalStorage::new(config.upload.clone());
    storage
        .bootstrap()
        .await
        .context("Failed to create upload directories")?;
    tracing::info!("Local storage initialized successfully");

    Ok(Arc::new(storage))
}
