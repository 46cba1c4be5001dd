//! Image store used when no image host is configured.

use super::service::{ImageStore, ImageUpload, StorageError};
use async_trait::async_trait;
use tracing::{debug, warn};

/// An image store that rejects every upload.
pub struct NullImageStore;

impl NullImageStore {
    pub fn new() -> Self {
        debug!("Using NullImageStore (avatar uploads disabled)");
        Self
    }
}

impl Default for NullImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for NullImageStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, StorageError> {
        warn!(size = image.bytes.len(), "Image upload refused: storage is not configured");
        Err(StorageError::NotConfigured)
    }
}
