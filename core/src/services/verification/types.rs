//! Types for two-step verification results

use chrono::{DateTime, Utc};

/// Delivery channel chosen for a verification code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryChannel {
    Sms,
    Email,
}

/// Verification state of a user, derived without side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// No current verification on record
    Unverified,
    /// Verified and inside the configured lifetime
    Verified { expires_at: DateTime<Utc> },
    /// Verified in the past but the lifetime has elapsed
    Expired,
    /// Too many failed attempts; waiting out the cooldown
    Locked,
}

/// Result of sending a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The channel the code went out on
    pub channel: DeliveryChannel,
    /// Message id reported by the delivery provider
    pub message_id: String,
    /// When the code was handed to the provider
    pub requested_at: DateTime<Utc>,
}

/// Result of confirming a submitted code
#[derive(Debug, Clone)]
pub struct ConfirmCodeResult {
    /// Whether the submitted code matched
    pub success: bool,
    /// Number of remaining attempts (if confirmation failed)
    pub remaining_attempts: Option<i32>,
    /// Error message if confirmation failed
    pub error_message: Option<String>,
}
