//! Handlers for registration, login and password reset.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
};
use crate::api::dto::message::MessageResponse;
use crate::api::dto::user::{UserMessageResponse, UserResponse};
use crate::api::middleware::AuthUser;
use crate::application::services::password_reset_service::RESET_REQUEST_ACK;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "email": "alice@example.com", "password": "secret1", "name": "Alice" }
/// ```
///
/// Username and email are trimmed and lowercased before validation.
///
/// # Errors
///
/// Returns 400 Bad Request if a field is missing or invalid, or if the
/// username or email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserMessageResponse>), AppError> {
    let payload = payload.normalized();

    if !payload.is_complete() {
        return Err(AppError::bad_request(
            "Please provide username, email and password",
            json!({}),
        ));
    }
    payload.validate()?;

    let user = state
        .auth_service
        .register(payload.into_registration())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserMessageResponse {
            message: "User registered successfully!".to_string(),
            user: UserResponse::from(user),
        }),
    ))
}

/// Exchanges credentials for an access token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 400 Bad Request if email or password is missing.
/// Returns 401 Unauthorized for an unknown email or a wrong password, with
/// the same body in both cases.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::bad_request(
            "Please provide email and password",
            json!({}),
        ));
    }

    let session = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: session.token,
        user: session.user.into(),
    }))
}

/// `GET /api/auth/me`
///
/// Returns 404 if the account was removed after the token was issued.
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth_service.current_user(auth.id).await?;
    Ok(Json(user.into()))
}

/// Starts a password reset.
///
/// # Endpoint
///
/// `POST /api/auth/forgot-password`
///
/// The response is the same whether or not the email belongs to an account,
/// and whether or not the email could be delivered.
///
/// # Errors
///
/// Returns 400 Bad Request if the email is missing.
/// Returns 500 only if the token could not be stored.
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::bad_request("Please provide an email", json!({})));
    }

    state
        .password_reset_service
        .request_reset(&payload.email)
        .await?;

    Ok(Json(MessageResponse::new(RESET_REQUEST_ACK)))
}

/// Sets a new password using the token from the reset email.
///
/// # Endpoint
///
/// `PATCH /api/auth/reset-password/{token}`
///
/// # Errors
///
/// Returns 400 `invalid_or_expired_token` if the token is unknown, expired
/// or already used.
/// Returns 400 `validation_error` if the new password is too short.
pub async fn reset_password_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .password_reset_service
        .reset_password(&token, &payload.password)
        .await?;

    Ok(Json(MessageResponse::new(
        "Password has been reset successfully",
    )))
}
