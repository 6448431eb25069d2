//! Traits for SMS and email delivery integration

use async_trait::async_trait;

/// Trait for SMS delivery integration
#[async_trait]
pub trait SmsDeliveryTrait: Send + Sync {
    /// Send a verification code via SMS, returning the provider message id
    async fn send_code_sms(&self, mobile: &str, code: &str) -> Result<String, String>;
}

/// Trait for email delivery integration
#[async_trait]
pub trait EmailDeliveryTrait: Send + Sync {
    /// Send a verification code via email, returning a delivery id
    async fn send_code_email(&self, address: &str, code: &str) -> Result<String, String>;
}
