//! SMTP mailer built on lettre.

use super::service::{MailError, Mailer, OutgoingEmail};
use crate::config::SmtpSettings;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

/// Sends mail through an authenticated STARTTLS relay.
///
/// The underlying transport keeps a connection pool, so one instance is
/// shared for the lifetime of the process.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport. No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Address`] if the sender address is invalid and
    /// [`MailError::Transport`] if the relay host cannot be resolved into a
    /// TLS configuration.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let address: Address = settings
            .from_address
            .parse()
            .map_err(|e| MailError::Address(format!("{}: {}", settings.from_address, e)))?;
        let from = Mailbox::new(Some(settings.from_name.clone()), address);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        info!("SMTP mailer configured for {}:{}", settings.host, settings.port);

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| MailError::Address(format!("{}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(email.text, email.html))
            .map_err(|e| MailError::Build(e.to_string()))?;

        match self.transport.send(message).await {
            Ok(response) => {
                info!(code = %response.code(), "Email sent");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "SMTP delivery failed");
                Err(MailError::Transport(e.to_string()))
            }
        }
    }
}
