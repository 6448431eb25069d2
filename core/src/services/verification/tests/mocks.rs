//! Mock delivery implementations for testing the two-step service

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::services::verification::{EmailDeliveryTrait, SmsDeliveryTrait};

/// SMS delivery mock recording every (mobile, code) pair it accepts
pub struct MockSmsDelivery {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    fail_with: Option<String>,
}

impl MockSmsDelivery {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(reason.to_string()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl SmsDeliveryTrait for MockSmsDelivery {
    async fn send_code_sms(&self, mobile: &str, code: &str) -> Result<String, String> {
        if let Some(reason) = &self.fail_with {
            return Err(reason.clone());
        }
        self.sent
            .lock()
            .unwrap()
            .push((mobile.to_string(), code.to_string()));
        Ok("mock-sms-id".to_string())
    }
}

/// Email delivery mock recording every (address, code) pair it accepts
pub struct MockEmailDelivery {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    fail_with: Option<String>,
}

impl MockEmailDelivery {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(reason.to_string()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailDeliveryTrait for MockEmailDelivery {
    async fn send_code_email(&self, address: &str, code: &str) -> Result<String, String> {
        if let Some(reason) = &self.fail_with {
            return Err(reason.clone());
        }
        self.sent
            .lock()
            .unwrap()
            .push((address.to_string(), code.to_string()));
        Ok("mock-email-id".to_string())
    }
}
