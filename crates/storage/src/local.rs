//! Local filesystem object store backend, for development and self-hosted
//! single-node deployments.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{ObjectStore, StorageError, StoredObject};

/// Stores objects under a root directory, served by the API's static file
/// route (or any reverse proxy pointed at the same directory).
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let mut public_base_url = public_base_url.into();
        while public_base_url.ends_with('/') {
            public_base_url.pop();
        }
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    /// Resolve a store path to an absolute filesystem path, rejecting any
    /// component that would escape the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                std::path::Component::ParentDir | std::path::Component::RootDir
            )
        });
        if escapes || path.is_empty() {
            return Err(StorageError::Rejected(format!("Invalid object path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Backend(e.to_string()))?;
        }
        tokio::fs::write(&full, bytes)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        tracing::debug!(path, "Stored object on local filesystem");

        Ok(StoredObject {
            path: path.to_string(),
            url: self.public_url(path),
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            // Idempotent: a missing file is already deleted.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "http://localhost:3000/files/");

        let stored = store
            .put("7/track.wav", b"RIFF".to_vec(), "audio/wav")
            .await
            .unwrap();
        assert_eq!(stored.url, "http://localhost:3000/files/7/track.wav");
        assert!(dir.path().join("7/track.wav").exists());

        store.delete("7/track.wav").await.unwrap();
        assert!(!dir.path().join("7/track.wav").exists());
    }

    #[tokio::test]
    async fn delete_missing_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "http://localhost:3000/files");
        store.delete("nope/missing.wav").await.unwrap();
    }

    #[tokio::test]
    async fn parent_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "http://localhost:3000/files");
        let result = store.put("../escape.wav", vec![1], "audio/wav").await;
        assert!(matches!(result, Err(StorageError::Rejected(_))));
    }
}
