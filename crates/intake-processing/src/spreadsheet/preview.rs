//! Spreadsheet preview extraction
//!
//! The preview is the first `max_rows` rows of the workbook's first
//! worksheet, counted from row 1 regardless of where data starts. Each row
//! spans column A through the last used column; missing cells are `null`.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use intake_core::{AppError, PreviewData};
use serde_json::Value;
use thiserror::Error;

use super::cell::cell_to_json;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Failed to open workbook: {0}")]
    Open(String),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Failed to read worksheet: {0}")]
    Read(String),

    #[error("Preview task failed: {0}")]
    Task(String),
}

impl From<PreviewError> for AppError {
    fn from(err: PreviewError) -> Self {
        AppError::PreviewParseFailure(err.to_string())
    }
}

/// Read the preview rows of the spreadsheet at `path`.
///
/// Blocking; see [`read_preview`] for use from async code.
pub fn extract_preview(path: &Path, max_rows: usize) -> Result<PreviewData, PreviewError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| PreviewError::Open(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(PreviewError::NoWorksheet)?
        .map_err(|e| PreviewError::Read(e.to_string()))?;

    Ok(leading_rows(&range, max_rows))
}

/// [`extract_preview`] on the blocking thread pool.
pub async fn read_preview(path: PathBuf, max_rows: usize) -> Result<PreviewData, PreviewError> {
    let start = std::time::Instant::now();
    let path_str = path.display().to_string();

    let rows = tokio::task::spawn_blocking(move || extract_preview(&path, max_rows))
        .await
        .map_err(|e| PreviewError::Task(e.to_string()))??;

    tracing::debug!(
        path = %path_str,
        rows = rows.len(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Spreadsheet preview extracted"
    );

    Ok(rows)
}

fn leading_rows(range: &Range<Data>, max_rows: usize) -> PreviewData {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };

    let row_count = (end_row as usize + 1).min(max_rows);

    (0..row_count as u32)
        .map(|row| {
            (0..=end_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(cell_to_json)
                        .unwrap_or(Value::Null)
                })
                .collect()
        })
        .collect()
}
