//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the VeriStep
//! application, following Clean Architecture principles. It provides
//! concrete implementations for external services: the SMS gateway used
//! for code delivery, SMTP email delivery, and configuration loading.
//!
//! Service implementations are bridged to the core delivery traits
//! through small adapters, so the verification lifecycle in `vs_core`
//! never depends on a concrete provider.

// Re-export core error types for convenience
pub use vs_core::errors::*;

/// SMS gateway module - external SMS delivery
pub mod sms;

/// Email module - SMTP and console mailers
pub mod email;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration management for infrastructure services
    //!
    //! Handles:
    //! - SMS gateway credentials and routing
    //! - SMTP relay settings
    //! - Environment-specific overrides via `.env`

    use serde::{Deserialize, Serialize};

    use crate::email::SmtpConfig;
    use crate::InfrastructureError;

    /// SMS gateway configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SmsConfig {
        /// SMS provider ("spryng", "mock")
        pub provider: String,
        /// Gateway account name
        pub account: String,
        /// Gateway auth token
        pub auth_token: String,
        /// Sender id shown to the recipient
        pub from: String,
        /// Gateway routing identifier
        pub route: String,
        /// Send endpoint override; the provider default applies when unset
        #[serde(default)]
        pub endpoint: Option<String>,
    }

    impl Default for SmsConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                account: String::new(),
                auth_token: String::new(),
                from: "VeriStep".to_string(),
                route: "business".to_string(),
                endpoint: None,
            }
        }
    }

    /// Infrastructure configuration settings
    #[derive(Debug, Clone)]
    pub struct InfrastructureConfig {
        /// SMS gateway configuration
        pub sms: SmsConfig,
        /// SMTP relay configuration; absent means the console mailer
        pub smtp: Option<SmtpConfig>,
    }

    /// Load infrastructure configuration from the environment
    ///
    /// Reads a `.env` file when present, then `SMS_*` variables (provider,
    /// account, auth token, sender, route, endpoint) and `SMTP_*` variables.
    /// A missing SMTP host is not an error; email then falls back to the
    /// console mailer.
    pub fn load_config() -> Result<InfrastructureConfig, InfrastructureError> {
        dotenvy::dotenv().ok();

        let sms = sms_config_from_env()
            .map_err(|e| InfrastructureError::Config(e.to_string()))?;
        let smtp = SmtpConfig::from_env().ok();

        Ok(InfrastructureConfig { sms, smtp })
    }

    fn sms_config_from_env() -> Result<SmsConfig, ::config::ConfigError> {
        let defaults = SmsConfig::default();

        ::config::Config::builder()
            .set_default("provider", defaults.provider)?
            .set_default("account", defaults.account)?
            .set_default("auth_token", defaults.auth_token)?
            .set_default("from", defaults.from)?
            .set_default("route", defaults.route)?
            .add_source(::config::Environment::with_prefix("SMS"))
            .build()?
            .try_deserialize()
    }

}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
