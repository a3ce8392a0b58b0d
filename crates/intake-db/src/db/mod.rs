//! Database repositories for data access layer
//!
//! Each repository owns one table and converts its rows into core domain types.

pub mod file_metadata;
pub mod transaction;

pub use file_metadata::{FileMetadataRepository, FileMetadataRow};
