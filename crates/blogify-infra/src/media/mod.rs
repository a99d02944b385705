//! Media storage implementations.

mod cloudinary;

pub use cloudinary::{CloudinaryConfig, CloudinaryStorage};

use async_trait::async_trait;

use blogify_core::ports::{MediaError, MediaStorage, MediaUpload};

/// Fallback used when no provider credentials are configured.
pub struct UnconfiguredStorage;

#[async_trait]
impl MediaStorage for UnconfiguredStorage {
    async fn upload(&self, file: MediaUpload) -> Result<String, MediaError> {
        tracing::warn!(filename = %file.filename, "Upload attempted without media storage configured");
        Err(MediaError::NotConfigured)
    }
}
