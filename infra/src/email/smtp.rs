//! SMTP mailer using lettre
//!
//! Delivers mail through an SMTP relay with STARTTLS and optional
//! credentials.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use super::mailer::{Email, Mailer};
use crate::InfrastructureError;

/// SMTP configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port (default: 587 for STARTTLS)
    pub port: u16,
    /// Username for authentication
    pub username: Option<String>,
    /// Password for authentication
    pub password: Option<String>,
    /// "From" address on outgoing mail
    pub from: String,
}

impl SmtpConfig {
    /// Create a new SMTP configuration
    pub fn new(host: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 587,
            username: None,
            password: None,
            from: from.into(),
        }
    }

    /// Set the port (default: 587)
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set authentication credentials
    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Create config from environment variables
    ///
    /// Reads `SMTP_HOST` and `SMTP_FROM` (required), `SMTP_PORT`,
    /// `SMTP_USERNAME`, and `SMTP_PASSWORD` (optional).
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let host = std::env::var("SMTP_HOST")
            .map_err(|_| InfrastructureError::Config("SMTP_HOST not set".to_string()))?;
        let from = std::env::var("SMTP_FROM")
            .map_err(|_| InfrastructureError::Config("SMTP_FROM not set".to_string()))?;

        let mut config = Self::new(host, from);
        if let Ok(port) = std::env::var("SMTP_PORT") {
            config.port = port.parse().map_err(|_| {
                InfrastructureError::Config("SMTP_PORT must be a number".to_string())
            })?;
        }
        config.username = std::env::var("SMTP_USERNAME").ok();
        config.password = std::env::var("SMTP_PASSWORD").ok();

        Ok(config)
    }
}

/// Mailer that delivers through an SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SmtpConfig) -> Result<Self, InfrastructureError> {
        let from = config.from.parse::<Mailbox>().map_err(|e| {
            InfrastructureError::Config(format!("Invalid SMTP from address: {}", e))
        })?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| {
                InfrastructureError::Email(format!("SMTP transport setup failed: {}", e))
            })?
            .port(config.port);

        if let (Some(username), Some(password)) = (config.username, config.password) {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SmtpConfig::from_env()?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<String, InfrastructureError> {
        let to = email.to.parse::<Mailbox>().map_err(|e| {
            InfrastructureError::Email(format!("Invalid recipient address: {}", e))
        })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.text.clone())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| InfrastructureError::Email(format!("SMTP send failed: {}", e)))?;

        info!(to = %email.to, "Email handed to SMTP relay");

        Ok(format!("smtp_{}", response.code()))
    }

    fn backend_name(&self) -> &str {
        "Smtp"
    }
}
