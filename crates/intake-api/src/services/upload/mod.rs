//! Upload service: validate, persist, record and preview one uploaded file.

mod service;
mod types;

pub use service::UploadService;
pub use types::UploadRequest;
