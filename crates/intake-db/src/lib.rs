//! Intake Database Layer
//!
//! This crate provides the metadata store abstraction, its PostgreSQL
//! repository, and an in-memory implementation for tests.

// Module declarations
pub mod db;
pub mod memory;
pub mod store;

// Re-exports: Repositories
pub use db::{FileMetadataRepository, FileMetadataRow};

// Re-exports: Transaction utilities
pub use db::transaction::with_transaction;

// Re-exports: Store abstraction and implementations
pub use memory::InMemoryMetadataStore;
pub use store::{no_commit_hook, CommitHook, MetadataStore};
