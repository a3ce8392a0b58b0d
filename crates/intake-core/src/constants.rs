//! Shared constants

/// Number of leading rows returned in a spreadsheet preview.
pub const PREVIEW_ROW_LIMIT: usize = 5;

/// Bytes in one kilobyte, as used for `size_kb`.
pub const BYTES_PER_KB: f64 = 1024.0;

/// Bytes in one megabyte, as used for the upload size limit.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Content type assumed when a multipart part carries none.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
