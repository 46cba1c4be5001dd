//! Password-reset token lifecycle: issue, deliver, redeem.
//!
//! Per user the reset state is either idle (no token) or issued (digest and
//! expiry stored). Issuing overwrites any earlier token; redeeming, or
//! failing to deliver the email, returns the user to idle.

use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::password_reset::{IssuedResetToken, hash_reset_token};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::mail::{MailError, Mailer, OutgoingEmail, PasswordResetEmail};
use crate::utils::password::{MIN_PASSWORD_LENGTH, hash_password, is_acceptable};

/// Response text for every reset request, whether or not the email exists.
pub const RESET_REQUEST_ACK: &str =
    "If an account with that email exists, a password reset link has been sent.";

pub struct PasswordResetService<U: UserRepository> {
    users: Arc<U>,
    mailer: Arc<dyn Mailer>,
    frontend_url: String,
    token_ttl: Duration,
    bcrypt_cost: u32,
}

impl<U: UserRepository + 'static> PasswordResetService<U> {
    pub fn new(
        users: Arc<U>,
        mailer: Arc<dyn Mailer>,
        frontend_url: String,
        token_ttl: Duration,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            mailer,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
            token_ttl,
            bcrypt_cost,
        }
    }

    /// Issues a reset token for the account registered under `email` and
    /// mails the reset link in the background.
    ///
    /// Succeeds silently for unknown emails. If the email cannot be
    /// delivered the token is cleared again.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the token cannot be generated or stored.
    pub async fn request_reset(&self, email: &str) -> Result<(), AppError> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for an unregistered email");
            return Ok(());
        };

        let token = IssuedResetToken::generate(Utc::now(), self.token_ttl).map_err(|e| {
            tracing::error!(error = %e, "OS random source unavailable");
            AppError::internal("Server error", json!({}))
        })?;

        self.users
            .set_password_reset(user.id, &token.token_hash, token.expires_at)
            .await?;

        let reset_url = format!("{}/reset-password/{}", self.frontend_url, token.raw);
        let message = PasswordResetEmail {
            to: &user.email,
            name: user.display_name(),
            reset_url: &reset_url,
            valid_minutes: self.token_ttl.num_minutes(),
        }
        .render();

        // Response time must not depend on whether the account exists.
        tokio::spawn(deliver_reset_email(
            Arc::clone(&self.users),
            Arc::clone(&self.mailer),
            user.id,
            message,
        ));

        Ok(())
    }

    /// Redeems a raw reset token and sets a new password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidToken`] if the token is unknown, expired,
    /// already used, or consumed concurrently.
    /// Returns [`AppError::Validation`] if the new password is too short.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn reset_password(&self, raw_token: &str, new_password: &str) -> Result<(), AppError> {
        let token_hash = hash_reset_token(raw_token.trim());

        let Some(user) = self
            .users
            .find_by_reset_token(&token_hash, Utc::now())
            .await?
        else {
            return Err(invalid_token());
        };

        if !is_acceptable(new_password) {
            return Err(AppError::bad_request(
                format!("Password must be at least {} characters long", MIN_PASSWORD_LENGTH),
                json!({ "min_length": MIN_PASSWORD_LENGTH }),
            ));
        }

        let password_hash = hash_password(new_password.to_string(), self.bcrypt_cost).await?;

        let changed = self
            .users
            .complete_password_reset(user.id, &token_hash, &password_hash, Utc::now())
            .await?;

        if !changed {
            return Err(invalid_token());
        }

        tracing::info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }
}

/// Sends a rendered reset email. If it cannot be delivered, the token is
/// cleared so no unusable reset stays pending.
pub(crate) async fn deliver_reset_email<U: UserRepository>(
    users: Arc<U>,
    mailer: Arc<dyn Mailer>,
    user_id: Uuid,
    message: Result<OutgoingEmail, MailError>,
) {
    let delivery = match message {
        Ok(message) => mailer.send(message).await,
        Err(e) => Err(e),
    };

    match delivery {
        Ok(()) => {
            metrics::counter!("password_reset_emails_sent_total").increment(1);
            tracing::info!(%user_id, "Password reset email sent");
        }
        Err(e) => {
            metrics::counter!("password_reset_emails_failed_total").increment(1);
            tracing::error!(
                %user_id,
                error = %e,
                "Password reset email could not be delivered, clearing token"
            );
            if let Err(clear_err) = users.clear_password_reset(user_id).await {
                tracing::error!(
                    %user_id,
                    error = %clear_err,
                    "Failed to clear undelivered reset token"
                );
            }
        }
    }
}

fn invalid_token() -> AppError {
    AppError::invalid_token("Password reset token is invalid or has expired", json!({}))
}
