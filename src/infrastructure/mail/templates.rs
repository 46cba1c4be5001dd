//! Email bodies rendered from `templates/emails/`.

use askama::Template;

use super::service::{MailError, OutgoingEmail};

#[derive(Template)]
#[template(path = "emails/password_reset.html")]
struct PasswordResetHtml<'a> {
    name: &'a str,
    reset_url: &'a str,
    valid_minutes: i64,
}

#[derive(Template)]
#[template(path = "emails/password_reset.txt")]
struct PasswordResetText<'a> {
    name: &'a str,
    reset_url: &'a str,
    valid_minutes: i64,
}

/// The password-reset message.
///
/// `reset_url` embeds the raw token, so the rendered email must not be logged.
pub struct PasswordResetEmail<'a> {
    pub to: &'a str,
    pub name: &'a str,
    pub reset_url: &'a str,
    pub valid_minutes: i64,
}

impl PasswordResetEmail<'_> {
    /// Renders both bodies.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Render`] if a template fails to render.
    pub fn render(&self) -> Result<OutgoingEmail, MailError> {
        let html = PasswordResetHtml {
            name: self.name,
            reset_url: self.reset_url,
            valid_minutes: self.valid_minutes,
        }
        .render()
        .map_err(|e| MailError::Render(e.to_string()))?;

        let text = PasswordResetText {
            name: self.name,
            reset_url: self.reset_url,
            valid_minutes: self.valid_minutes,
        }
        .render()
        .map_err(|e| MailError::Render(e.to_string()))?;

        Ok(OutgoingEmail {
            to: self.to.to_string(),
            subject: format!(
                "Your password reset link (valid for {} minutes)",
                self.valid_minutes
            ),
            text,
            html,
        })
    }
}
