//! Handlers for link management and click counting.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::links::{LinkRequest, LinkResponse, ReorderRequest};
use crate::api::dto::message::MessageResponse;
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/user/links`
///
/// The caller's links sorted by `order`.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links(auth.id).await?;
    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Adds a link at the end of the caller's list.
///
/// # Endpoint
///
/// `POST /api/user/links`
///
/// # Request Body
///
/// ```json
/// { "title": "Portfolio", "url": "https://example.com", "linkType": "link", "socialPlatform": null }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if title or url is missing or invalid.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<LinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let link = state
        .link_service
        .create_link(auth.id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Replaces a link's content. Its position is not changed.
///
/// # Endpoint
///
/// `PUT /api/user/links/{linkId}`
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed id or missing title/url.
/// Returns 404 Not Found if the link does not exist or belongs to another user.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(link_id): Path<String>,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .link_service
        .update_link(auth.id, &link_id, payload.into())
        .await?;

    Ok(Json(link.into()))
}

/// Deletes a link. Positions of the remaining links are not compacted.
///
/// # Endpoint
///
/// `DELETE /api/user/links/{linkId}`
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed id.
/// Returns 404 Not Found if the link does not exist or belongs to another user.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(link_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.link_service.delete_link(auth.id, &link_id).await?;
    Ok(Json(MessageResponse::new("Link deleted successfully")))
}

/// Sets the display order of the caller's links in one transaction.
///
/// # Endpoint
///
/// `PUT /api/user/links/reorder`
///
/// # Request Body
///
/// ```json
/// { "orderedLinkIds": ["<id of first>", "<id of second>"] }
/// ```
///
/// Entry `i` receives `order = i`. Either every entry is applied or none is.
///
/// # Errors
///
/// Returns 400 Bad Request if `orderedLinkIds` is not an array of strings.
/// Returns 500 Internal Server Error if any entry is malformed, unknown or
/// owned by another user, or the store fails; nothing is changed then.
pub async fn reorder_links_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "orderedLinkIds must be an array",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    state
        .link_service
        .reorder_links(auth.id, payload.ordered_link_ids)
        .await?;

    Ok(Json(MessageResponse::new("Links reordered successfully")))
}

/// Counts a visit to a link. Public.
///
/// # Endpoint
///
/// `POST /api/links/{linkId}/click`
///
/// # Response Codes
///
/// - **204 No Content**: counted
/// - **400 Bad Request**: malformed id
/// - **404 Not Found**: no such link
pub async fn click_handler(
    State(state): State<AppState>,
    Path(link_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.record_click(&link_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
