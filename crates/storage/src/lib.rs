//! Object store abstraction for order files.
//!
//! One trait, three backends: S3 for production, local filesystem for
//! development, in-memory for tests. Callers never see backend types --
//! everything goes through `Arc<dyn ObjectStore>`.

pub mod local;
pub mod memory;
pub mod s3;

use async_trait::async_trait;

pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

/// Failure from an object store backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object store rejected the write: {0}")]
    Rejected(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object store backend error: {0}")]
    Backend(String),
}

/// Result of a successful `put`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Backend-relative path of the stored object.
    pub path: String,
    /// Public retrieval URL.
    pub url: String,
}

/// Binary object storage.
///
/// Paths are forward-slash-separated and relative to the backend root
/// (e.g. `"42/8f3a9c.wav"` -- order id, then a generated object name).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object. Overwriting an existing path is a backend error --
    /// object names are generated to be unique per upload.
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;

    /// Public retrieval URL for a stored path.
    fn public_url(&self, path: &str) -> String;

    /// Delete an object. Deleting a missing path is not an error (deletes
    /// are used for compensating cleanup and must be idempotent).
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}
