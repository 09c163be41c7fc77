//! Client-side error taxonomy.
//!
//! Four categories, one per failure surface. All are surfaced to the user
//! through a transient notice; none trigger automatic retries.

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Sign-in/up/out failure.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Read-path failure (listing orders, loading a profile).
    #[error("Remote fetch error: {0}")]
    Fetch(String),

    /// Write-path failure (status mutation, order creation).
    #[error("Remote update error: {0}")]
    Update(String),

    /// File transfer failure, including client-side policy rejections.
    #[error("Upload error: {0}")]
    Upload(String),
}
