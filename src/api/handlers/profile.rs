//! Handlers for the caller's profile and public profile pages.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::profile::{ProfileResponse, UpdateProfileRequest};
use crate::api::dto::public_profile::PublicProfileResponse;
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/user/profile/me`
///
/// Returns 404 until the profile has been saved once.
pub async fn get_my_profile_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.profile_service.get_my_profile(auth.id).await?;
    Ok(Json(profile.into()))
}

/// Creates or updates the caller's profile.
///
/// # Endpoint
///
/// `PUT /api/user/profile/me`
///
/// # Request Body
///
/// All fields are optional. Only provided fields are changed.
///
/// ```json
/// {
///   "bio": "Photographer",
///   "themeColor": "#112233",
///   "buttonStyle": "rounded-full",
///   "selectedThemeId": null   // clears the theme
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the trimmed bio is longer than 160 characters.
pub async fn update_my_profile_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let payload = payload.normalized();
    payload.validate()?;

    let profile = state
        .profile_service
        .update_my_profile(auth.id, payload.into())
        .await?;

    Ok(Json(profile.into()))
}

/// `GET /api/profiles/{username}`
///
/// Public page data: display fields, profile settings (or `null`) and links
/// in display order.
pub async fn public_profile_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PublicProfileResponse>, AppError> {
    let page = state.profile_service.public_profile(&username).await?;
    Ok(Json(page.into()))
}
