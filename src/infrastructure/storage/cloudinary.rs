//! Cloudinary signed uploads.
//!
//! Requests are authenticated with a signature over the upload parameters:
//! the parameters (excluding `file`, `api_key` and the signature fields)
//! sorted by name and joined as `k=v&k=v`, followed by the API secret,
//! hashed with SHA-256.

use super::service::{ImageStore, ImageUpload, StorageError};
use crate::config::CloudinarySettings;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{error, info};

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorMessage,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

pub struct CloudinaryStore {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryStore {
    /// # Errors
    ///
    /// Returns [`StorageError::Request`] if the HTTP client cannot be built.
    pub fn new(settings: &CloudinarySettings) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder().timeout(UPLOAD_TIMEOUT).build()?;

        info!("Cloudinary image store configured for cloud '{}'", settings.cloud_name);

        Ok(Self {
            client,
            upload_url: format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                settings.cloud_name
            ),
            api_key: settings.api_key.clone(),
            api_secret: settings.api_secret.clone(),
        })
    }
}

/// Computes the upload signature for `params`.
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    hex::encode(Sha256::digest(format!("{}{}", joined, api_secret).as_bytes()))
}

#[async_trait]
impl ImageStore for CloudinaryStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, StorageError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("folder", image.folder.as_str()), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );

        let file_name = image.file_name.unwrap_or_else(|| "avatar".to_string());
        let part = Part::bytes(image.bytes)
            .file_name(file_name)
            .mime_str(&image.content_type)?;

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", image.folder)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self.client.post(&self.upload_url).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "unknown error".to_string());
            error!(status = status.as_u16(), %message, "Cloudinary rejected the upload");
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<UploadResponse>().await?;
        Ok(body.secure_url)
    }
}
