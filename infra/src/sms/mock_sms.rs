//! Mock SMS Service Implementation
//!
//! Logs messages through tracing instead of sending them, tracks how many
//! were accepted, and can simulate delivery failure for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use super::sms_service::{is_valid_phone_number, mask_phone_number, SmsService};
use crate::InfrastructureError;

/// Mock SMS service for development and testing
#[derive(Clone, Default)]
pub struct MockSmsService {
    message_count: Arc<AtomicU64>,
    last_message: Arc<Mutex<Option<(String, String)>>>,
    simulate_failure: bool,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock service that fails every send
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Total number of messages accepted
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// The most recently accepted (phone, message) pair
    pub fn last_message(&self) -> Option<(String, String)> {
        self.last_message.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
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

        if self.simulate_failure {
            warn!(
                "Mock SMS service simulating failure for {}",
                mask_phone_number(phone_number)
            );
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_message.lock().unwrap() =
            Some((phone_number.to_string(), message.to_string()));

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %mask_phone_number(phone_number),
            message_id = %message_id,
            message_count = count,
            "SMS sent successfully (mock)"
        );

        // Simulate network delay
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sms_send_success() {
        let service = MockSmsService::new();

        let message_id = service
            .send_sms("+31612345678", "Code:4821")
            .await
            .unwrap();

        assert!(message_id.starts_with("mock_"));
        assert_eq!(service.message_count(), 1);
        assert_eq!(
            service.last_message(),
            Some(("+31612345678".to_string(), "Code:4821".to_string()))
        );
    }

    #[tokio::test]
    async fn test_mock_sms_rejects_invalid_phone() {
        let service = MockSmsService::new();

        let result = service.send_sms("31612345678", "Code:4821").await;
        assert!(matches!(result, Err(InfrastructureError::Sms(_))));
        assert_eq!(service.message_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_sms_simulated_failure() {
        let service = MockSmsService::failing();

        let result = service.send_sms("+31612345678", "Code:4821").await;
        assert!(result.is_err());
        assert!(!service.is_available().await);
        assert_eq!(service.message_count(), 0);
    }

    #[tokio::test]
    async fn test_verification_code_message_body() {
        let service = MockSmsService::new();

        service
            .send_verification_code("+31612345678", "4821")
            .await
            .unwrap();

        let (_, body) = service.last_message().unwrap();
        assert_eq!(body, "Code:4821");
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(MockSmsService::new().provider_name(), "Mock");
    }
}
