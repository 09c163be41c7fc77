use mixdesk_core::uploads::DEFAULT_MAX_UPLOAD_SIZE_BYTES;

use crate::auth::jwt::JwtConfig;

/// Which object store backend to use for order files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Local filesystem under `storage_root`.
    Local,
    /// S3 bucket named by `s3_bucket`.
    S3,
}

/// Server configuration loaded from environment variables.
///
/// All fields except `JWT_SECRET` have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Maximum accepted upload size in bytes (default: 1 GiB). One limit
    /// for every upload surface.
    pub max_upload_size_bytes: u64,
    /// Object store backend selection.
    pub storage_backend: StorageBackend,
    /// Root directory for the local object store.
    pub storage_root: String,
    /// Bucket name for the S3 object store.
    pub s3_bucket: String,
    /// Public base URL prepended to stored object paths.
    pub public_files_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                        |
    /// |-------------------------|--------------------------------|
    /// | `HOST`                  | `0.0.0.0`                      |
    /// | `PORT`                  | `3000`                         |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                           |
    /// | `MAX_UPLOAD_SIZE_BYTES` | `1073741824`                   |
    /// | `STORAGE_BACKEND`       | `local`                        |
    /// | `STORAGE_ROOT`          | `./order-files`                |
    /// | `S3_BUCKET`             | `order-files`                  |
    /// | `PUBLIC_FILES_URL`      | `http://localhost:3000/files`  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_size_bytes: u64 = std::env::var("MAX_UPLOAD_SIZE_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_SIZE_BYTES must be a valid u64");

        let storage_backend = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".into())
            .as_str()
        {
            "local" => StorageBackend::Local,
            "s3" => StorageBackend::S3,
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be 'local' or 's3'"),
        };

        let storage_root =
            std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "./order-files".into());

        let s3_bucket = std::env::var("S3_BUCKET").unwrap_or_else(|_| "order-files".into());

        let public_files_url = std::env::var("PUBLIC_FILES_URL")
            .unwrap_or_else(|_| "http://localhost:3000/files".into());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            max_upload_size_bytes,
            storage_backend,
            storage_root,
            s3_bucket,
            public_files_url,
        }
    }
}
