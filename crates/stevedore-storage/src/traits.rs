//! The trait seam over the object-store SDK.

use std::path::Path;

use async_trait::async_trait;

use crate::error::StorageError;

/// Information about a remote object from a list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Object key.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
}

/// Low-level object-store operations needed by the publish/fetch
/// workflow. Implemented by the AWS SDK client and by test substitutes.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file as one object.
    async fn put_object_from_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<(), StorageError>;

    /// Download one object to a local file, creating parent directories
    /// as needed.
    async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<(), StorageError>;

    /// List every object under a prefix. Pagination is handled by the
    /// implementation; the full set is returned.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectInfo>, StorageError>;
}
