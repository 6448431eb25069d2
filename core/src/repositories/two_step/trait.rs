//! Two-step record repository trait defining the persistence interface.
//!
//! Implementations handle the actual storage while keeping the abstraction
//! boundary between the domain and infrastructure layers. The trait is
//! async-first and uses Result types for error handling.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::TwoStepRecord;
use crate::errors::DomainError;

/// Repository trait for two-step verification record persistence
#[async_trait]
pub trait TwoStepRepository: Send + Sync {
    /// Find the verification record for a user
    ///
    /// # Returns
    /// * `Ok(Some(TwoStepRecord))` - Record found
    /// * `Ok(None)` - No record exists for this user yet
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<TwoStepRecord>, DomainError>;

    /// Insert `record` unless one already exists for its user
    ///
    /// Idempotent get-or-create keyed by `record.user_id`: when a record is
    /// already stored, that record is returned and `record` is discarded.
    async fn find_or_create(&self, record: TwoStepRecord) -> Result<TwoStepRecord, DomainError>;

    /// Persist an updated record
    ///
    /// The stored record's `version` must match `record.version`; a stale
    /// version yields `DomainError::Conflict` so racing read-modify-write
    /// sequences cannot silently lose updates. On success the returned
    /// record carries the incremented version.
    async fn save(&self, record: TwoStepRecord) -> Result<TwoStepRecord, DomainError>;
}
