//! Route configuration and setup.

mod health;

use crate::handlers::upload::{upload_by_kind, upload_excel, upload_image, upload_video};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use intake_core::validation::max_upload_bytes;
use intake_core::Config;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    // The upload service enforces the exact file limit; this only caps how
    // much a client can make the server buffer. Tripping it surfaces as a
    // multipart error inside the handler, which reports it as too large.
    let body_limit =
        max_upload_bytes(config.max_upload_mb()).saturating_add(MULTIPART_OVERHEAD_BYTES);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);
    tracing::info!(body_limit, "Upload body limit enabled");

    crate::error::hide_error_details(config.is_production());

    let upload_routes = Router::new()
        .route("/upload/excel", post(upload_excel))
        .route("/upload/image", post(upload_image))
        .route("/upload/video", post(upload_video))
        .route("/upload/{kind}", post(upload_by_kind))
        .layer(DefaultBodyLimit::max(body_limit));

    let health_routes = Router::new()
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check));

    upload_routes
        .merge(health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
