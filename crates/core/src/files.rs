//! File descriptors attached to orders and revisions.
//!
//! Descriptors are immutable once written: replacing a file means
//! appending a new descriptor, never editing an existing one. They are
//! stored as a JSONB array on `orders.files` and a single JSONB object on
//! `revisions.file`.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// One uploaded file attached to an order or revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Original file name as selected by the uploader.
    pub name: String,
    /// MIME content type reported at upload time.
    pub content_type: String,
    /// Retrieval URL in the object store.
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    /// Optional version tag (used by revision deliveries).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<DbId>,
}

impl FileDescriptor {
    /// Build a descriptor for a freshly stored object.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        url: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            url: url.into(),
            size,
            version: None,
            uploaded_at: None,
            uploaded_by: None,
        }
    }

    /// Attach the uploading user and timestamp.
    pub fn with_uploader(mut self, user_id: DbId, at: Timestamp) -> Self {
        self.uploaded_by = Some(user_id);
        self.uploaded_at = Some(at);
        self
    }

    /// Tag this descriptor with a revision version.
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let desc = FileDescriptor::new("mix.wav", "audio/wav", "https://files/mix.wav", 1024);
        let json = serde_json::to_value(&desc).unwrap();
        assert!(json.get("version").is_none());
        assert!(json.get("uploaded_at").is_none());
        assert!(json.get("uploaded_by").is_none());
        assert_eq!(json["name"], "mix.wav");
        assert_eq!(json["size"], 1024);
    }

    #[test]
    fn test_round_trip_with_version() {
        let desc = FileDescriptor::new("master-v2.wav", "audio/wav", "https://files/m2.wav", 42)
            .with_version(2);
        let json = serde_json::to_string(&desc).unwrap();
        let back: FileDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
        assert_eq!(back.version, Some(2));
    }
}
