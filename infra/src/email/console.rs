//! Console mailer for development
//!
//! Logs emails through tracing instead of delivering them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use super::mailer::{Email, Mailer};
use crate::InfrastructureError;

/// Mailer that logs messages instead of delivering them
#[derive(Default)]
pub struct ConsoleMailer {
    sent: AtomicU64,
}

impl ConsoleMailer {
    /// Create a new console mailer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages logged so far
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, email: &Email) -> Result<String, InfrastructureError> {
        let count = self.sent.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "mailer",
            backend = "console",
            to = %email.to,
            subject = %email.subject,
            body = %email.text,
            "Email logged, not delivered"
        );

        Ok(format!("console_{}", count))
    }

    fn backend_name(&self) -> &str {
        "Console"
    }
}
