//! DTOs for registration, login and password reset.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

use crate::application::services::Registration;
use crate::domain::entities::User;

/// Lowercase letters, digits and underscores.
static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").unwrap());

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

/// Request body for `POST /api/auth/register`.
///
/// Call [`RegisterRequest::normalized`] before validating: the username
/// rules apply to the lowercased value.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "Username can only contain letters, numbers, and underscores"
    ))]
    pub username: String,

    #[serde(default)]
    #[validate(regex(path = "*EMAIL_REGEX", message = "Please use a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    pub name: Option<String>,
}

impl RegisterRequest {
    /// Trims and lowercases username and email, trims the display name.
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_lowercase(),
            email: self.email.trim().to_lowercase(),
            password: self.password,
            name: self
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.email.is_empty() && !self.password.is_empty()
    }

    pub fn into_registration(self) -> Registration {
        Registration {
            username: self.username,
            email: self.email,
            password: self.password,
            name: self.name,
        }
    }
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
}

impl From<User> for LoginUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            name: u.name,
        }
    }
}

/// Request body for `POST /api/auth/forgot-password`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

/// Request body for `PATCH /api/auth/reset-password/{token}`.
///
/// Password length is checked only after the token is accepted.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub password: String,
}
