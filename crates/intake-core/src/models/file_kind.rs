use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Kind of uploaded file
///
/// The kind selects the extension and content-type allow-lists and the
/// storage directory. Its wire name (`excel`, `image`, `video`) is used in
/// URLs, in the `file_type` column and in upload responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    #[serde(rename = "excel")]
    Spreadsheet,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
}

impl FileKind {
    pub const ALL: [FileKind; 3] = [FileKind::Spreadsheet, FileKind::Image, FileKind::Video];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Spreadsheet => "excel",
            FileKind::Image => "image",
            FileKind::Video => "video",
        }
    }

    /// Allowed extensions, lowercase with the leading dot.
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            FileKind::Spreadsheet => &[".xlsx", ".xls"],
            FileKind::Image => &[".png", ".jpg", ".jpeg"],
            FileKind::Video => &[".mp4", ".avi", ".mov", ".mkv"],
        }
    }

    /// Explicitly listed content types.
    ///
    /// Video additionally accepts any `video/*` value, see
    /// [`FileKind::accepts_any_with_prefix`].
    pub fn allowed_content_types(&self) -> &'static [&'static str] {
        match self {
            FileKind::Spreadsheet => &[
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                "application/vnd.ms-excel",
            ],
            FileKind::Image => &["image/png", "image/jpeg"],
            FileKind::Video => &[
                "video/mp4",
                "video/x-msvideo",
                "video/quicktime",
                "video/x-matroska",
            ],
        }
    }

    /// Content-type prefix accepted wholesale for this kind, if any.
    pub fn accepts_any_with_prefix(&self) -> Option<&'static str> {
        match self {
            FileKind::Video => Some("video/"),
            FileKind::Spreadsheet | FileKind::Image => None,
        }
    }

    /// Whether uploads of this kind get a content preview.
    pub fn has_preview(&self) -> bool {
        matches!(self, FileKind::Spreadsheet)
    }
}

impl FromStr for FileKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" => Ok(FileKind::Spreadsheet),
            "image" => Ok(FileKind::Image),
            "video" => Ok(FileKind::Video),
            _ => Err(AppError::InvalidKind(s.to_string())),
        }
    }
}

impl Display for FileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
