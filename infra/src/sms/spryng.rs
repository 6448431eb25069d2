//! Spryng SMS Gateway Client
//!
//! Sends messages through the Spryng HTTP API: one form-encoded POST per
//! message carrying the account credentials, routing, destination, and
//! body. The gateway signals rejection through the HTTP status code; the
//! response body carries no usable payload and is discarded.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::sms::sms_service::{is_valid_phone_number, mask_phone_number, SmsService};
use crate::InfrastructureError;

/// Default Spryng send endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.spryngsms.com/api/send.php";

/// Spryng gateway configuration
#[derive(Debug, Clone)]
pub struct SpryngConfig {
    /// Gateway account name
    pub account: String,
    /// Gateway auth token
    pub auth_token: String,
    /// Sender id shown to the recipient
    pub from: String,
    /// Gateway routing identifier
    pub route: String,
    /// Send endpoint, overridable for tests and regional deployments
    pub endpoint: String,
    /// Timeout for gateway requests in seconds
    pub request_timeout_secs: u64,
}

impl SpryngConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let account = std::env::var("SPRYNG_ACCOUNT")
            .map_err(|_| InfrastructureError::Config("SPRYNG_ACCOUNT not set".to_string()))?;
        let auth_token = std::env::var("SPRYNG_AUTH_TOKEN")
            .map_err(|_| InfrastructureError::Config("SPRYNG_AUTH_TOKEN not set".to_string()))?;
        let from = std::env::var("SPRYNG_FROM")
            .map_err(|_| InfrastructureError::Config("SPRYNG_FROM not set".to_string()))?;

        Ok(Self {
            account,
            auth_token,
            from,
            route: std::env::var("SPRYNG_ROUTE").unwrap_or_else(|_| "business".to_string()),
            endpoint: std::env::var("SPRYNG_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            request_timeout_secs: std::env::var("SPRYNG_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// Spryng SMS gateway client
pub struct SpryngSmsService {
    client: reqwest::Client,
    config: SpryngConfig,
}

impl SpryngSmsService {
    /// Create a new Spryng gateway client
    pub fn new(config: SpryngConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!("Spryng SMS gateway initialized with sender: {}", config.from);

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SpryngConfig::from_env()?)
    }

    /// Assemble the form fields for one outbound message
    fn build_form(&self, destination: &str, body: &str) -> Vec<(&'static str, String)> {
        vec![
            ("USERNAME", self.config.account.clone()),
            ("PASSWORD", self.config.auth_token.clone()),
            ("SENDER", self.config.from.clone()),
            ("ROUTE", self.config.route.clone()),
            ("DESTINATION", destination.to_string()),
            ("BODY", body.to_string()),
        ]
    }
}

#[async_trait]
impl SmsService for SpryngSmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_phone_number(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                mask_phone_number(phone_number)
            )));
        }

        debug!(
            "Posting SMS to Spryng gateway for {}",
            mask_phone_number(phone_number)
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&self.build_form(phone_number, message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "Spryng gateway rejected message for {}: HTTP {}",
                mask_phone_number(phone_number),
                status
            );
            return Err(InfrastructureError::Sms(format!(
                "Gateway returned HTTP {}",
                status
            )));
        }

        let message_id = format!("spryng_{}", uuid::Uuid::new_v4());

        info!(
            "SMS accepted by Spryng gateway for {} with id {}",
            mask_phone_number(phone_number),
            message_id
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Spryng"
    }
}
