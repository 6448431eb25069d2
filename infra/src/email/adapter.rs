//! Email Delivery Trait Adapter
//!
//! Bridges any `Mailer` backend to the core email delivery seam used by
//! the verification lifecycle.

use async_trait::async_trait;
use std::sync::Arc;
use vs_core::services::verification::EmailDeliveryTrait;

use super::mailer::{Email, Mailer};

/// Adapter that sends verification codes through a mailer backend
pub struct MailerCodeDeliveryAdapter {
    mailer: Arc<dyn Mailer>,
}

impl MailerCodeDeliveryAdapter {
    /// Create a new code delivery adapter over a mailer backend
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl EmailDeliveryTrait for MailerCodeDeliveryAdapter {
    async fn send_code_email(&self, address: &str, code: &str) -> Result<String, String> {
        self.mailer
            .send(&Email::verification_code(address, code))
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::ConsoleMailer;

    #[tokio::test]
    async fn test_adapter_renders_code_email() {
        let mailer = Arc::new(ConsoleMailer::new());
        let adapter = MailerCodeDeliveryAdapter::new(mailer.clone());

        let delivery_id = adapter
            .send_code_email("user@example.com", "4821")
            .await
            .unwrap();

        assert_eq!(delivery_id, "console_1");
        assert_eq!(mailer.sent_count(), 1);
    }
}
