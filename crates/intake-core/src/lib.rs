//! Intake Core Library
//!
//! This crate provides the domain models, error types, configuration, and validation
//! rules shared by every Intake component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{FileKind, FileMetadataRecord, NewFileMetadata, PreviewData, UploadResponse};
