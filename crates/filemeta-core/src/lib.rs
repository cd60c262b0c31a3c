//! filemeta core library
//!
//! Configuration, error taxonomy and domain models shared by every filemeta crate.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
// Note: Storage, StorageError, StorageResult live in filemeta-storage
