//! Error types for the two-step verification flow.

use thiserror::Error;

/// Verification-flow errors
///
/// These errors represent the ways the secondary verification step can
/// fail. Presentation-layer wording is the caller's concern.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Verification code expired")]
    VerificationCodeExpired,

    #[error("Maximum attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("User is not verified")]
    NotVerified,

    #[error("Code delivery failed: {reason}")]
    DeliveryFailure { reason: String },
}
