//! filemeta storage library
//!
//! This crate provides the `Storage` abstraction the ingest pipeline downloads
//! objects through, with implementations for the hosted object API (Supabase),
//! S3-compatible stores and the local filesystem.
//!
//! # Object addressing
//!
//! Every call names a `(bucket, object_path)` pair exactly as delivered by the
//! storage webhook. Paths must not contain `..` segments or a leading `/`;
//! validation is centralized in the `keys` module so all backends agree.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
#[cfg(feature = "storage-supabase")]
pub mod supabase;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use filemeta_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
#[cfg(feature = "storage-supabase")]
pub use supabase::SupabaseStorage;
pub use traits::{Storage, StorageError, StorageResult};
