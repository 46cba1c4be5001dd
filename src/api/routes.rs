//! API route configuration.
//!
//! Routes are grouped by who may call them so that the top-level router can
//! give each group its own authentication and rate limit.

use crate::api::handlers::{
    click_handler, create_link_handler, delete_link_handler, forgot_password_handler,
    get_my_profile_handler, list_links_handler, login_handler, me_handler, ping_handler,
    public_profile_handler, register_handler, reorder_links_handler, reset_password_handler,
    update_link_handler, update_my_profile_handler, upload_avatar_handler,
};
use crate::application::services::avatar_service::MAX_AVATAR_BYTES;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
};

/// Room for multipart boundaries and part headers around the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Unauthenticated account endpoints.
///
/// # Endpoints
///
/// - `POST  /auth/register`                - Create an account
/// - `POST  /auth/login`                   - Obtain an access token
/// - `POST  /auth/forgot-password`         - Email a password reset link
/// - `PATCH /auth/reset-password/{token}`  - Set a new password with a reset token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/forgot-password", post(forgot_password_handler))
        .route("/auth/reset-password/{token}", patch(reset_password_handler))
}

/// Endpoints that act on the caller's own account. Require a Bearer token.
///
/// # Endpoints
///
/// - `GET    /auth/me`                 - Current account
/// - `GET    /user/profile/me`         - Own profile
/// - `PUT    /user/profile/me`         - Create or patch own profile
/// - `GET    /user/links`              - Own links in display order
/// - `POST   /user/links`              - Append a link
/// - `PUT    /user/links/reorder`      - Set the order of all links atomically
/// - `PUT    /user/links/{linkId}`     - Replace a link's content
/// - `DELETE /user/links/{linkId}`     - Delete a link
/// - `PUT    /user/avatar`             - Upload a new avatar (multipart)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me_handler))
        .route(
            "/user/profile/me",
            get(get_my_profile_handler).put(update_my_profile_handler),
        )
        .route(
            "/user/links",
            get(list_links_handler).post(create_link_handler),
        )
        .route("/user/links/reorder", put(reorder_links_handler))
        .route(
            "/user/links/{link_id}",
            put(update_link_handler).delete(delete_link_handler),
        )
        .route(
            "/user/avatar",
            put(upload_avatar_handler)
                .layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
}

/// Endpoints anyone may call.
///
/// # Endpoints
///
/// - `GET  /ping`                   - Liveness probe
/// - `GET  /profiles/{username}`    - Public profile page data
/// - `POST /links/{linkId}/click`   - Count a visit to a link
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/profiles/{username}", get(public_profile_handler))
        .route("/links/{link_id}/click", post(click_handler))
}
