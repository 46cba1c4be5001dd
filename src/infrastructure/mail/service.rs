//! Mailer trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// A rendered message ready for delivery. Sent as multipart/alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("email delivery is not configured")]
    NotConfigured,
    #[error("invalid address: {0}")]
    Address(String),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("failed to render template: {0}")]
    Render(String),
    #[error("SMTP delivery failed: {0}")]
    Transport(String),
}

/// Delivers transactional email.
///
/// # Implementations
///
/// - [`crate::infrastructure::mail::SmtpMailer`] - SMTP relay
/// - [`crate::infrastructure::mail::NullMailer`] - Always fails
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the message cannot be built or the relay
    /// rejects it.
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}
