//! SMS Service Interface
//!
//! Defines the trait for SMS service implementations that deliver
//! verification codes, plus phone-number helpers shared by providers.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number (E.164 format)
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier for the accepted message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError>;

    /// Send a verification code via SMS
    ///
    /// Formats the standard verification message body around the code.
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        self.send_sms(phone_number, &format!("Code:{}", code)).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Mask a phone number for logging, keeping the last four characters.
pub fn mask_phone_number(phone: &str) -> String {
    let visible = 4;
    if phone.len() <= visible {
        return "*".repeat(phone.len());
    }

    let (hidden, tail) = phone.split_at(phone.len() - visible);
    let masked: String = hidden
        .chars()
        .map(|c| if c == '+' { '+' } else { '*' })
        .collect();

    format!("{}{}", masked, tail)
}

/// Validate phone number format (E.164): a leading '+' followed by 10 to
/// 15 digits.
pub fn is_valid_phone_number(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };

    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
