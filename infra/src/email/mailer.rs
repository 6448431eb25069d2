//! Mailer trait and outbound email message type

use async_trait::async_trait;

use crate::InfrastructureError;

/// An outbound plain-text email message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub text: String,
}

impl Email {
    /// Create a new email message
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
        }
    }

    /// The standard verification-code email
    pub fn verification_code(to: impl Into<String>, code: &str) -> Self {
        Self::new(
            to,
            "Your verification code",
            format!(
                "Your verification code is {}. Enter it to finish signing in.",
                code
            ),
        )
    }
}

/// Trait for sending email
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email, returning a delivery id
    async fn send(&self, email: &Email) -> Result<String, InfrastructureError>;

    /// Backend name for logs
    fn backend_name(&self) -> &str;
}
