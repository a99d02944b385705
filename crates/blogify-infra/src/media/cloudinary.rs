//! Cloudinary upload relay.
//!
//! Files are sent with a signed upload request: the signature is the SHA-1 of
//! the alphabetically sorted request parameters followed by the API secret.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use blogify_core::ports::{MediaError, MediaStorage, MediaUpload};

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
    /// API root, overridable for tests and proxies.
    pub api_base: String,
    pub timeout: Duration,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: "blogify".to_string(),
            api_base: "https://api.cloudinary.com/v1_1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.api_base.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

#[derive(Debug, Deserialize)]
struct UploadResult {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

/// Sign upload parameters the way Cloudinary expects.
pub(crate) fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

pub struct CloudinaryStorage {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryStorage {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl MediaStorage for CloudinaryStorage {
    async fn upload(&self, file: MediaUpload) -> Result<String, MediaError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let params = [
            ("folder", self.config.folder.clone()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = sign(&params, &self.config.api_secret);

        let mut part = Part::bytes(file.bytes).file_name(file.filename.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| MediaError::Rejected(e.to_string()))?;
        }

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("folder", self.config.folder.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ProviderError>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(MediaError::Rejected(message));
        }

        let result: UploadResult = response
            .json()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        tracing::info!(filename = %file.filename, url = %result.secure_url, "File uploaded");
        Ok(result.secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_matches_provider_example() {
        let params = [
            ("timestamp", "1315060510".to_string()),
            ("public_id", "sample_image".to_string()),
            ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop".to_string()),
        ];

        assert_eq!(
            sign(&params, "abcd"),
            "bfd09f95f331f558cbd1320e67aa8d488770583e"
        );
    }

    #[test]
    fn test_signature_of_upload_params() {
        let params = [
            ("folder", "blogify".to_string()),
            ("timestamp", "1700000000".to_string()),
        ];

        assert_eq!(
            sign(&params, "secret"),
            "983e678c88225937445a8de790c7c0b8ce1da19c"
        );
    }

    #[test]
    fn test_upload_url() {
        let mut config = CloudinaryConfig::new("demo", "key", "secret");
        assert_eq!(
            config.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );

        config.api_base = "http://localhost:9000/".to_string();
        assert_eq!(config.upload_url(), "http://localhost:9000/demo/image/upload");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_a_transport_error() {
        let mut config = CloudinaryConfig::new("demo", "key", "secret");
        config.api_base = "http://127.0.0.1:9".to_string();
        config.timeout = Duration::from_secs(2);
        let storage = CloudinaryStorage::new(config).unwrap();

        let result = storage
            .upload(MediaUpload {
                filename: "a.png".to_string(),
                content_type: Some("image/png".to_string()),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            })
            .await;

        assert!(matches!(result, Err(MediaError::Transport(_))));
    }
}
