//! Shared object address validation for storage backends.

use crate::{StorageError, StorageResult};

/// Reject bucket names and object paths that could escape their namespace.
///
/// Buckets must be a single non-empty segment. Object paths must be non-empty,
/// relative, and free of `..` segments.
pub fn validate_object_address(bucket: &str, object_path: &str) -> StorageResult<()> {
    if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
        return Err(StorageError::InvalidKey(format!(
            "invalid bucket name '{}'",
            bucket
        )));
    }

    if object_path.is_empty()
        || object_path.starts_with('/')
        || object_path.split('/').any(|segment| segment == "..")
    {
        return Err(StorageError::InvalidKey(format!(
            "invalid object path '{}'",
            object_path
        )));
    }

    Ok(())
}

/// Percent-encode each `/`-separated segment of an object path.
#[cfg(feature = "storage-supabase")]
pub fn encode_object_path(object_path: &str) -> String {
    object_path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
