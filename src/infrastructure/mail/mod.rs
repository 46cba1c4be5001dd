//! Outbound email.
//!
//! Provides a [`Mailer`] trait with two implementations:
//! - [`SmtpMailer`] - SMTP relay with STARTTLS
//! - [`NullMailer`] - Used when SMTP is not configured; every delivery fails

mod null_mailer;
mod service;
mod smtp_mailer;
mod templates;

pub use null_mailer::NullMailer;
pub use service::{MailError, Mailer, OutgoingEmail};
pub use smtp_mailer::SmtpMailer;
pub use templates::PasswordResetEmail;

#[cfg(test)]
pub use service::MockMailer;
