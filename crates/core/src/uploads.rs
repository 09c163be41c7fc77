//! Upload validation policy.
//!
//! One policy governs every upload surface. The allowed content-type set
//! is the union of what the order-creation and order-details surfaces
//! accept; the size limit is a single configured value rather than a
//! per-surface constant. Validation runs before any object-store call, on
//! both the client and the server.

/// Default maximum upload size: 1 GiB.
pub const DEFAULT_MAX_UPLOAD_SIZE_BYTES: u64 = 1024 * 1024 * 1024;

/// Content types accepted for order files.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "audio/wav",
    "audio/mpeg",
    "audio/mp3",
    "application/zip",
    "application/x-zip-compressed",
    "application/x-zip",
    "application/octet-stream",
    "application/pdf",
];

/// Why an upload was rejected before reaching the object store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("Invalid file type '{content_type}' for file '{name}'")]
    DisallowedType { name: String, content_type: String },

    #[error("File too large: '{name}' is {size} bytes (limit {limit})")]
    TooLarge { name: String, size: u64, limit: u64 },

    #[error("Empty file: '{name}'")]
    Empty { name: String },
}

/// Upload constraints applied to every file before it is stored.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_size_bytes: u64,
}

impl UploadPolicy {
    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }

    /// Check a single candidate file against the policy.
    pub fn validate(
        &self,
        name: &str,
        content_type: &str,
        size: u64,
    ) -> Result<(), UploadRejection> {
        if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
            return Err(UploadRejection::DisallowedType {
                name: name.to_string(),
                content_type: content_type.to_string(),
            });
        }
        if size == 0 {
            return Err(UploadRejection::Empty {
                name: name.to_string(),
            });
        }
        if size > self.max_size_bytes {
            return Err(UploadRejection::TooLarge {
                name: name.to_string(),
                size,
                limit: self.max_size_bytes,
            });
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_SIZE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_accepted() {
        let policy = UploadPolicy::default();
        assert!(policy.validate("stems.wav", "audio/wav", 1024).is_ok());
    }

    #[test]
    fn test_text_file_rejected() {
        let policy = UploadPolicy::default();
        let result = policy.validate("notes.txt", "text/plain", 12);
        assert_eq!(
            result,
            Err(UploadRejection::DisallowedType {
                name: "notes.txt".into(),
                content_type: "text/plain".into(),
            })
        );
    }

    #[test]
    fn test_size_boundary() {
        let policy = UploadPolicy::new(100);
        assert!(policy.validate("a.wav", "audio/wav", 100).is_ok());
        assert!(matches!(
            policy.validate("a.wav", "audio/wav", 101),
            Err(UploadRejection::TooLarge { .. })
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        let policy = UploadPolicy::default();
        assert!(matches!(
            policy.validate("a.wav", "audio/wav", 0),
            Err(UploadRejection::Empty { .. })
        ));
    }

    #[test]
    fn test_normalized_set_includes_both_zip_spellings() {
        let policy = UploadPolicy::default();
        assert!(policy.validate("a.zip", "application/zip", 1).is_ok());
        assert!(policy.validate("a.zip", "application/x-zip", 1).is_ok());
        assert!(policy
            .validate("a.zip", "application/x-zip-compressed", 1)
            .is_ok());
        assert!(policy
            .validate("a.bin", "application/octet-stream", 1)
            .is_ok());
    }
}
