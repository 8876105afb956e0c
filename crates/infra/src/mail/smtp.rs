use super::{Email, IMailer, MailReceipt, TransportError};
use crate::config::SmtpConfig;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

const SMTP_TIMEOUT_SECS: u64 = 10;

/// Delivers reminders over authenticated SMTP with STARTTLS
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, TransportError> {
        let from = config.from.parse::<Mailbox>().map_err(|e| {
            TransportError::InvalidMessage(format!(
                "The sender address: {} is not valid: {}",
                config.from, e
            ))
        })?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| {
                TransportError::NotConfigured(format!(
                    "The SMTP relay: {} is not valid: {}",
                    config.host, e
                ))
            })?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(SMTP_TIMEOUT_SECS)))
            .build();
        Ok(Self { transport, from })
    }
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<MailReceipt, TransportError> {
        let to = email.to.parse::<Mailbox>().map_err(|e| {
            TransportError::InvalidMessage(format!(
                "The recipient address: {} is not valid: {}",
                email.to, e
            ))
        })?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(email.text.clone()))
                    .singlepart(SinglePart::html(email.html.clone())),
            )
            .map_err(|e| TransportError::InvalidMessage(e.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| TransportError::Delivery(e.to_string()))?;
        Ok(MailReceipt {
            message_id: response.message().collect::<Vec<_>>().join(" "),
        })
    }
}
