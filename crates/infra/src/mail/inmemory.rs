use super::{Email, IMailer, MailReceipt, TransportError};
use std::sync::Mutex;

/// Records outgoing mail instead of delivering it. Addresses can be
/// registered as failing to exercise retry handling in tests.
pub struct InMemoryMailer {
    pub sent: Mutex<Vec<Email>>,
    failing: Mutex<Vec<String>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failing: Mutex::new(vec![]),
        }
    }

    pub fn fail_address(&self, email: &str) {
        self.failing.lock().unwrap().push(email.to_string());
    }

    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn deliveries_to(&self, email: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.to == email)
            .count()
    }
}

impl Default for InMemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, email: &Email) -> Result<MailReceipt, TransportError> {
        if self.failing.lock().unwrap().contains(&email.to) {
            return Err(TransportError::Delivery(format!(
                "Connection refused for {}",
                email.to
            )));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(MailReceipt {
            message_id: format!("inmemory-{}", sent.len()),
        })
    }
}
