//! Media storage port - where uploaded files end up.

use async_trait::async_trait;

/// A single uploaded file, fully buffered.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// External storage that accepts a file and returns a public URL for it.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn upload(&self, file: MediaUpload) -> Result<String, MediaError>;
}

/// Media storage errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Media storage is not configured")]
    NotConfigured,

    #[error("Upload rejected by provider: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),
}
