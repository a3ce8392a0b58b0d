//! Intake API Library
//!
//! HTTP handlers, the upload pipeline and application setup for the
//! file intake service.

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{UploadRequest, UploadService};
