//! Image store trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// An image to upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: String,
    /// Destination folder on the image host.
    pub folder: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("image storage is not configured")]
    NotConfigured,
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("image host rejected the upload ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Stores images and returns their public URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::CloudinaryStore`] - Cloudinary
/// - [`crate::infrastructure::storage::NullImageStore`] - Always fails
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Uploads an image.
    ///
    /// # Returns
    ///
    /// The HTTPS URL under which the image is served.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the upload fails or is rejected.
    async fn upload(&self, image: ImageUpload) -> Result<String, StorageError>;
}
