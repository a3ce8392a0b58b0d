//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns "ready", "timeout", or "not_ready: {error}".
async fn run_check<F, E>(timeout: Duration, f: F) -> (bool, String)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => (true, "ready".to_string()),
        Ok(Err(e)) => (false, format!("not_ready: {}", e)),
        Err(_) => (false, "timeout".to_string()),
    }
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - metadata store reachable and upload directories present.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (database_ok, database) = run_check(CHECK_TIMEOUT, state.uploads.metadata.ping()).await;
    if !database_ok {
        tracing::error!(status = %database, "Database readiness check failed");
    }

    let (storage_ok, storage) = run_check(CHECK_TIMEOUT, state.uploads.storage.check_ready()).await;
    if !storage_ok {
        tracing::error!(status = %storage, "Storage readiness check failed");
    }

    let ready = database_ok && storage_ok;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "database": database,
            "storage": storage,
        })),
    )
}
