//! Authenticated-user context passed into the verification lifecycle.
//!
//! The lifecycle never consults an ambient auth facade; callers hand the
//! already-authenticated user in explicitly so the service stays testable
//! and free of framework globals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot of the authenticated user relevant to code delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// User identifier, the key of the verification record
    pub id: Uuid,

    /// Address used when the code is delivered by email
    pub email: String,

    /// Registered mobile number; when present, codes go out over SMS
    pub mobile: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a context without a registered mobile number.
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            mobile: None,
        }
    }

    /// Sets the registered mobile number.
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    /// Whether SMS delivery applies to this user.
    pub fn has_mobile(&self) -> bool {
        self.mobile.is_some()
    }
}
