//! Configuration for the two-step verification service

use crate::domain::entities::{
    CODE_LENGTH, DEFAULT_EXCEEDED_COOLDOWN_MINUTES, DEFAULT_VERIFIED_LIFETIME_MINUTES,
    MAX_ATTEMPTS,
};

/// Configuration for the two-step verification service
#[derive(Debug, Clone)]
pub struct TwoStepServiceConfig {
    /// Number of digits in a generated verification code
    pub code_length: usize,
    /// Minutes a verified session remains valid between checks
    pub verified_lifetime_minutes: i64,
    /// Minutes a locked account waits before the counter may reset
    pub exceeded_cooldown_minutes: i64,
    /// Maximum number of failed confirmation attempts before lockout
    pub max_attempts: i32,
}

impl Default for TwoStepServiceConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            verified_lifetime_minutes: DEFAULT_VERIFIED_LIFETIME_MINUTES,
            exceeded_cooldown_minutes: DEFAULT_EXCEEDED_COOLDOWN_MINUTES,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}
