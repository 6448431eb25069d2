//! Two-step verification record entity.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of digits in a generated verification code
pub const CODE_LENGTH: usize = 4;

/// Maximum number of failed confirmation attempts before lockout
pub const MAX_ATTEMPTS: i32 = 3;

/// Default lifetime of a verified session in minutes (6 hours)
pub const DEFAULT_VERIFIED_LIFETIME_MINUTES: i64 = 360;

/// Default cooldown after exceeding the attempt limit in minutes (24 hours)
pub const DEFAULT_EXCEEDED_COOLDOWN_MINUTES: i64 = 1440;

/// Generates a verification code of `length` random decimal digits,
/// wrapped by `prefix` and `suffix`.
///
/// Each digit is an independent uniform draw from the OS CSPRNG, so the
/// output length is always `length + prefix.len() + suffix.len()`.
pub fn generate_code(length: usize, prefix: &str, suffix: &str) -> String {
    let mut rng = OsRng;
    let mut code = String::with_capacity(prefix.len() + length + suffix.len());

    code.push_str(prefix);
    for _ in 0..length {
        let digit: u8 = rng.gen_range(0..10);
        code.push(char::from(b'0' + digit));
    }
    code.push_str(suffix);

    code
}

/// Returns true once the cooldown window following `lockout_start` has
/// fully elapsed. The boundary instant itself still counts as locked.
pub fn has_lockout_expired(lockout_start: DateTime<Utc>, cooldown_minutes: i64) -> bool {
    Utc::now() > lockout_start + Duration::minutes(cooldown_minutes)
}

/// Per-user two-step verification state.
///
/// One record exists per user identifier, created lazily on the first
/// verification check and reused for the life of the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoStepRecord {
    /// User this record belongs to
    pub user_id: Uuid,

    /// The currently valid one-time code
    pub auth_code: String,

    /// Failed/pending confirmation attempts since the last reset
    pub auth_count: i32,

    /// Whether the user is currently considered verified
    pub auth_status: bool,

    /// When verification last succeeded
    pub auth_date: Option<DateTime<Utc>>,

    /// When the current code was last sent
    pub request_date: Option<DateTime<Utc>>,

    /// Optimistic-concurrency version, incremented on every save
    pub version: i64,
}

impl TwoStepRecord {
    /// Creates a fresh unverified record with a generated code.
    pub fn new(user_id: Uuid) -> Self {
        Self::new_with_code_length(user_id, CODE_LENGTH)
    }

    /// Creates a fresh unverified record with a code of `code_length` digits.
    pub fn new_with_code_length(user_id: Uuid, code_length: usize) -> Self {
        Self {
            user_id,
            auth_code: generate_code(code_length, "", ""),
            auth_count: 0,
            auth_status: false,
            auth_date: None,
            request_date: None,
            version: 0,
        }
    }

    /// Drops the record back to the unverified state: new code, zeroed
    /// counter, cleared timestamps.
    pub fn reset(&mut self, code_length: usize) {
        self.auth_code = generate_code(code_length, "", "");
        self.auth_count = 0;
        self.auth_status = false;
        self.auth_date = None;
        self.request_date = None;
    }

    /// Marks the record verified as of now, rotating the code and zeroing
    /// the counter. Used both for initial confirmation and for renewal.
    pub fn mark_verified(&mut self, code_length: usize) {
        self.auth_code = generate_code(code_length, "", "");
        self.auth_count = 0;
        self.auth_status = true;
        self.auth_date = Some(Utc::now());
        self.request_date = None;
    }

    /// Clears a lockout: zeroes the counter and rotates the code without
    /// touching the verification status or timestamps.
    pub fn clear_lockout(&mut self, code_length: usize) {
        self.auth_count = 0;
        self.auth_code = generate_code(code_length, "", "");
    }

    /// Counts one failed confirmation attempt.
    pub fn register_attempt(&mut self) {
        self.auth_count += 1;
    }

    /// Stamps the record as having had its code sent just now.
    pub fn mark_code_sent(&mut self) -> DateTime<Utc> {
        let requested_at = Utc::now();
        self.request_date = Some(requested_at);
        requested_at
    }

    /// Whether the verified lifetime has elapsed since the last successful
    /// verification. A verified record without a timestamp counts as expired.
    pub fn lifetime_expired(&self, lifetime_minutes: i64) -> bool {
        self.auth_date
            .map(|date| Utc::now() > date + Duration::minutes(lifetime_minutes))
            .unwrap_or(true)
    }

    /// Whether the attempt counter has reached the lockout threshold.
    pub fn is_locked(&self, max_attempts: i32) -> bool {
        self.auth_count >= max_attempts
    }

    /// Remaining confirmation attempts (0 once exceeded).
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.auth_count).max(0)
    }
}
