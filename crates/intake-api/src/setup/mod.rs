//! Application setup and initialization
//!
//! Everything `main` needs before it can serve: configuration checks,
//! tracing, the database pool, upload directories and the router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use intake_core::Config;
use intake_db::FileMetadataRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;
    let metadata = Arc::new(FileMetadataRepository::new(pool));

    let state = Arc::new(AppState::new(config, storage, metadata));
    let router = routes::setup_routes(&state.config, state.clone());

    Ok((state, router))
}
