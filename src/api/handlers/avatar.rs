//! Handler for avatar upload.

use axum::{
    Extension, Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::user::{UserMessageResponse, UserResponse};
use crate::api::middleware::AuthUser;
use crate::application::services::AvatarFile;
use crate::error::AppError;
use crate::state::AppState;

/// Multipart field carrying the image.
pub const AVATAR_FIELD: &str = "avatar";

/// Replaces the caller's avatar.
///
/// # Endpoint
///
/// `PUT /api/user/avatar` (`multipart/form-data`, field `avatar`)
///
/// The image is stored with the configured image host and the returned
/// URL is saved on the account.
///
/// # Errors
///
/// Returns 400 Bad Request if no file is sent, the file is not an image, or
/// it exceeds the size limit.
/// Returns 500 Internal Server Error if the image host fails.
pub async fn upload_avatar_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UserMessageResponse>, AppError> {
    let mut multipart =
        multipart.map_err(|_| AppError::bad_request("No file uploaded", json!({})))?;

    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(map_multipart_error)?;

        file = Some(AvatarFile {
            bytes: bytes.to_vec(),
            file_name,
            content_type,
        });
        break;
    }

    let file = file.ok_or_else(|| AppError::bad_request("No file uploaded", json!({})))?;

    let user = state.avatar_service.upload_avatar(auth.id, file).await?;

    Ok(Json(UserMessageResponse {
        message: "Avatar updated successfully".to_string(),
        user: UserResponse::from(user),
    }))
}

fn map_multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::bad_request("File is too large", json!({}))
    } else {
        tracing::debug!(error = %e, "Malformed multipart body");
        AppError::bad_request("Malformed upload", json!({ "reason": e.body_text() }))
    }
}
