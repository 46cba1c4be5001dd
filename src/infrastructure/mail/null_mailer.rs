//! Mailer used when SMTP is not configured.

use super::service::{MailError, Mailer, OutgoingEmail};
use async_trait::async_trait;
use tracing::{debug, warn};

/// A mailer that refuses every message.
///
/// Reporting failure instead of silently succeeding means a password-reset
/// token is cleared again when nobody can receive it.
pub struct NullMailer;

impl NullMailer {
    pub fn new() -> Self {
        debug!("Using NullMailer (email delivery disabled)");
        Self
    }
}

impl Default for NullMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for NullMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        warn!(subject = %email.subject, "Email not sent: delivery is not configured");
        Err(MailError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_mailer_always_fails() {
        let email = OutgoingEmail {
            to: "someone@example.com".to_string(),
            subject: "Hi".to_string(),
            text: "Hi".to_string(),
            html: "<p>Hi</p>".to_string(),
        };
        assert!(matches!(
            NullMailer::new().send(email).await,
            Err(MailError::NotConfigured)
        ));
    }
}
