//! Intake processing
//!
//! Content extraction run after an upload is stored. Currently this is the
//! spreadsheet preview: the leading rows of the first worksheet.

pub mod spreadsheet;

pub use spreadsheet::{extract_preview, read_preview, PreviewError};
