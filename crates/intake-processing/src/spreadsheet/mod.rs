//! Spreadsheet preview module

mod cell;
mod preview;

pub use preview::{extract_preview, read_preview, PreviewError};
