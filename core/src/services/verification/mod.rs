//! Two-step verification lifecycle service
//!
//! This module provides the complete two-step verification workflow:
//! - Lazily created per-user verification records
//! - Code generation and delivery over SMS or email
//! - Verified-session expiry and renewal
//! - Attempt tracking with lockout cooldown

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::TwoStepServiceConfig;
pub use service::TwoStepService;
pub use traits::{EmailDeliveryTrait, SmsDeliveryTrait};
pub use types::{ConfirmCodeResult, DeliveryChannel, SendCodeResult, VerificationStatus};
