//! Upload validation rules
//!
//! Each check is a pure function over the declared request values. Checks run
//! in a fixed order (filename, extension, content type, size) and the first
//! failure short-circuits the upload before anything touches storage.

use std::path::Path;

use crate::constants::BYTES_PER_MB;
use crate::error::AppError;
use crate::models::FileKind;

/// Maximum accepted filename length after normalization.
const MAX_FILENAME_LENGTH: usize = 255;

/// Normalize a client-supplied filename: final path component, lowercased.
///
/// Rejects names that are empty or resolve to `.`/`..` so the stored file
/// always lands directly inside the kind directory.
pub fn normalize_filename(filename: &str) -> Result<String, AppError> {
    let last_component = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    if last_component.is_empty() || last_component == "." || last_component == ".." {
        return Err(AppError::InvalidFilename(format!(
            "'{}' does not name a file",
            filename
        )));
    }

    if last_component.chars().any(char::is_control) {
        return Err(AppError::InvalidFilename(
            "Filename contains control characters".to_string(),
        ));
    }

    // Lowercasing can grow some characters, so measure the stored name.
    let normalized = last_component.to_lowercase();
    if normalized.len() > MAX_FILENAME_LENGTH {
        return Err(AppError::InvalidFilename(format!(
            "Filename longer than {} bytes",
            MAX_FILENAME_LENGTH
        )));
    }

    Ok(normalized)
}

/// Extension of `filename` including the leading dot, lowercased.
///
/// Returns an empty string when there is none (`"README"`, `".bashrc"`).
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Check the filename's extension against the kind's allow-list.
pub fn validate_extension(kind: FileKind, filename: &str) -> Result<String, AppError> {
    let extension = file_extension(filename);

    if !kind.allowed_extensions().contains(&extension.as_str()) {
        return Err(AppError::InvalidExtension { extension, kind });
    }

    Ok(extension)
}

/// Check the declared content type against the kind's allow-list.
///
/// The declared value is trusted as sent; bytes are never sniffed. Video
/// accepts any `video/*` value in addition to its listed types.
pub fn validate_content_type(kind: FileKind, content_type: &str) -> Result<(), AppError> {
    let listed = kind.allowed_content_types().contains(&content_type);
    let by_prefix = kind
        .accepts_any_with_prefix()
        .is_some_and(|prefix| content_type.starts_with(prefix));

    if !listed && !by_prefix {
        return Err(AppError::InvalidContentType {
            content_type: content_type.to_string(),
            kind,
        });
    }

    Ok(())
}

/// Upload limit in bytes for a limit given in megabytes.
pub fn max_upload_bytes(limit_mb: u64) -> u64 {
    limit_mb.saturating_mul(BYTES_PER_MB)
}

/// Check an observed byte count against the megabyte limit.
pub fn validate_file_size(kind: FileKind, size_bytes: u64, limit_mb: u64) -> Result<(), AppError> {
    if size_bytes > max_upload_bytes(limit_mb) {
        return Err(AppError::FileTooLarge { limit_mb, kind });
    }
    if size_bytes == 0 {
        return Err(AppError::EmptyFile);
    }
    Ok(())
}
