//! SMS Service Trait Adapters
//!
//! Adapters that implement the core `SmsDeliveryTrait` for the
//! infrastructure SMS services, bridging provider implementations to the
//! core verification lifecycle.

use async_trait::async_trait;
use vs_core::services::verification::SmsDeliveryTrait;

use crate::sms::mock_sms::MockSmsService;
use crate::sms::sms_service::SmsService;
use crate::sms::spryng::{SpryngConfig, SpryngSmsService};
use crate::InfrastructureError;

/// Adapter that exposes the Spryng gateway as the core SMS delivery seam
pub struct SpryngSmsServiceAdapter {
    inner: SpryngSmsService,
}

impl SpryngSmsServiceAdapter {
    /// Create a new Spryng SMS delivery adapter
    pub fn new(config: SpryngConfig) -> Result<Self, InfrastructureError> {
        Ok(Self {
            inner: SpryngSmsService::new(config)?,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SpryngConfig::from_env()?)
    }
}

#[async_trait]
impl SmsDeliveryTrait for SpryngSmsServiceAdapter {
    async fn send_code_sms(&self, mobile: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(mobile, code)
            .await
            .map_err(|e| e.to_string())
    }
}

/// Adapter that exposes the mock SMS service as the core delivery seam
#[derive(Clone, Default)]
pub struct MockSmsServiceAdapter {
    inner: MockSmsService,
}

impl MockSmsServiceAdapter {
    /// Create a new mock SMS delivery adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// The wrapped mock service, for test assertions
    pub fn inner(&self) -> &MockSmsService {
        &self.inner
    }
}

#[async_trait]
impl SmsDeliveryTrait for MockSmsServiceAdapter {
    async fn send_code_sms(&self, mobile: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(mobile, code)
            .await
            .map_err(|e| e.to_string())
    }
}
