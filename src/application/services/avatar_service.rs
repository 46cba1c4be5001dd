//! Avatar upload.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::storage::{ImageStore, ImageUpload};

/// Largest accepted avatar, in bytes.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Folder on the image host that receives avatars.
pub const AVATAR_FOLDER: &str = "biolink_avatars";

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct AvatarFile {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

pub struct AvatarService<U: UserRepository> {
    users: Arc<U>,
    images: Arc<dyn ImageStore>,
}

impl<U: UserRepository> AvatarService<U> {
    pub fn new(users: Arc<U>, images: Arc<dyn ImageStore>) -> Self {
        Self { users, images }
    }

    /// Stores `file` on the image host and points the user's avatar at it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the file is empty, not an image,
    /// or larger than [`MAX_AVATAR_BYTES`].
    /// Returns [`AppError::Internal`] if the image host fails.
    /// Returns [`AppError::NotFound`] if the user no longer exists.
    pub async fn upload_avatar(&self, user_id: Uuid, file: AvatarFile) -> Result<User, AppError> {
        if file.bytes.is_empty() {
            return Err(AppError::bad_request("No file uploaded", json!({})));
        }

        let content_type = file
            .content_type
            .filter(|ct| ct.starts_with("image/"))
            .ok_or_else(|| AppError::bad_request("Only image files are allowed", json!({})))?;

        if file.bytes.len() > MAX_AVATAR_BYTES {
            return Err(AppError::bad_request(
                "File is too large",
                json!({ "max_bytes": MAX_AVATAR_BYTES }),
            ));
        }

        let size = file.bytes.len();
        let url = self
            .images
            .upload(ImageUpload {
                bytes: file.bytes,
                file_name: file.file_name,
                content_type,
                folder: AVATAR_FOLDER.to_string(),
            })
            .await
            .map_err(|e| {
                tracing::error!(%user_id, error = %e, "Avatar upload failed");
                AppError::internal("Server error during avatar upload", json!({}))
            })?;

        let user = self
            .users
            .update_avatar(user_id, &url)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))?;

        tracing::info!(%user_id, size, "Avatar updated");
        Ok(user)
    }
}
