//! In-memory object store backend, for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{ObjectStore, StorageError, StoredObject};

/// Holds objects in a map and counts operations.
///
/// `fail_on_name` lets a test inject a mid-batch failure: any `put` whose
/// path contains the configured substring is rejected.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    put_calls: Mutex<usize>,
    fail_on_name: Option<String>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any `put` whose path contains `needle`.
    pub fn failing_on(needle: impl Into<String>) -> Self {
        Self {
            fail_on_name: Some(needle.into()),
            ..Self::default()
        }
    }

    /// Number of `put` calls attempted (including rejected ones).
    pub fn put_calls(&self) -> usize {
        *self.put_calls.lock().unwrap()
    }

    /// Whether an object is currently stored at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.objects.lock().unwrap().contains_key(path)
    }

    /// Number of objects currently stored.
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        *self.put_calls.lock().unwrap() += 1;

        if let Some(needle) = &self.fail_on_name {
            if path.contains(needle.as_str()) {
                return Err(StorageError::Rejected(format!(
                    "Injected failure for path: {path}"
                )));
            }
        }

        self.objects.lock().unwrap().insert(path.to_string(), bytes);
        Ok(StoredObject {
            path: path.to_string(),
            url: self.public_url(path),
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://{path}")
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.objects.lock().unwrap().remove(path);
        Ok(())
    }
}
