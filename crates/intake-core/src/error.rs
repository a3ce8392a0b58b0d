//! Error types module
//!
//! All failures of the upload pipeline are unified under the `AppError` enum.
//! Validation failures are client errors; storage and metadata-store failures
//! are server errors.
//!
//! `From<sqlx::Error>` is gated behind the `sqlx` feature.

use std::io;

use crate::models::FileKind;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for degraded but recoverable outcomes
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_EXTENSION")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File extension {} not allowed for type {kind}", display_extension(.extension))]
    InvalidExtension { extension: String, kind: FileKind },

    #[error("MIME type {content_type} is invalid for {kind}")]
    InvalidContentType { content_type: String, kind: FileKind },

    #[error("File exceeds maximum allowed size of {limit_mb} MB for type {kind}")]
    FileTooLarge { limit_mb: u64, kind: FileKind },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Unknown upload type: {0}")]
    InvalidKind(String),

    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upload aborted: {0}")]
    UploadAborted(String),

    #[error("Storage write failed: {0}")]
    StorageWriteFailure(String),

    #[error("Metadata store error: {0}")]
    MetadataStoreFailure(String),

    #[error("Preview could not be generated: {0}")]
    PreviewParseFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

fn display_extension(extension: &str) -> &str {
    if extension.is_empty() {
        "(none)"
    } else {
        extension
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::MetadataStoreFailure(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidExtension { .. } => (
            400,
            "INVALID_EXTENSION",
            false,
            Some("Upload a file with an extension allowed for this type"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidContentType { .. } => (
            400,
            "INVALID_CONTENT_TYPE",
            false,
            Some("Send a Content-Type allowed for this type"),
            false,
            LogLevel::Debug,
        ),
        AppError::FileTooLarge { .. } => (
            400,
            "FILE_TOO_LARGE",
            false,
            Some("Reduce file size and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidFilename(_) => (
            400,
            "INVALID_FILENAME",
            false,
            Some("Send a plain file name without path components"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidKind(_) => (
            400,
            "INVALID_KIND",
            false,
            Some("Use one of: excel, image, video"),
            false,
            LogLevel::Debug,
        ),
        AppError::EmptyFile => (
            400,
            "EMPTY_FILE",
            false,
            Some("Upload a non-empty file"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::UploadAborted(_) => (
            400,
            "UPLOAD_ABORTED",
            true,
            Some("Retry the upload"),
            false,
            LogLevel::Warn,
        ),
        AppError::StorageWriteFailure(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::MetadataStoreFailure(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::PreviewParseFailure(_) => (
            422,
            "PREVIEW_PARSE_FAILED",
            false,
            Some("Check that the spreadsheet opens in a spreadsheet application"),
            false,
            LogLevel::Warn,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidExtension { .. } => "InvalidExtension",
            AppError::InvalidContentType { .. } => "InvalidContentType",
            AppError::FileTooLarge { .. } => "FileTooLarge",
            AppError::InvalidFilename(_) => "InvalidFilename",
            AppError::InvalidKind(_) => "InvalidKind",
            AppError::EmptyFile => "EmptyFile",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::UploadAborted(_) => "UploadAborted",
            AppError::StorageWriteFailure(_) => "StorageWriteFailure",
            AppError::MetadataStoreFailure(_) => "MetadataStoreFailure",
            AppError::PreviewParseFailure(_) => "PreviewParseFailure",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Whether this is a validation failure raised before any side effect.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status_code())
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::StorageWriteFailure(_) => "Failed to store file".to_string(),
            AppError::MetadataStoreFailure(_) => "Failed to record file metadata".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}
