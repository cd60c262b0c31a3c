//! filemeta database library
//!
//! Record store implementations for the `files` table.

pub mod db;

pub use db::{create_file_record_store, FileRecordStore, PostgresFileRepository};
#[cfg(feature = "rest")]
pub use db::RestFileRepository;
