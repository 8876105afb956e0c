mod inmemory;
mod smtp;

pub use inmemory::InMemoryMailer;
pub use smtp::SmtpMailer;
use thiserror::Error;

/// A rendered reminder addressed to a single recipient
#[derive(Debug, Clone)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Transport acknowledgement for a delivered email
#[derive(Debug, Clone)]
pub struct MailReceipt {
    pub message_id: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Mail transport is not configured: {0}")]
    NotConfigured(String),
    #[error("Invalid mail address or message: {0}")]
    InvalidMessage(String),
    #[error("Failed to deliver mail: {0}")]
    Delivery(String),
}

#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<MailReceipt, TransportError>;
}

/// Mailer used when SMTP credentials are absent. The reminder pipeline keeps
/// running and every delivery attempt lands in the ledger as failed.
pub struct UnconfiguredMailer {}

#[async_trait::async_trait]
impl IMailer for UnconfiguredMailer {
    async fn send(&self, _email: &Email) -> Result<MailReceipt, TransportError> {
        Err(TransportError::NotConfigured(
            "SMTP credentials are not set".into(),
        ))
    }
}
