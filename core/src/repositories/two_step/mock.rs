//! Mock implementation of TwoStepRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::TwoStepRecord;
use crate::errors::DomainError;

use super::trait_::TwoStepRepository;

/// In-memory two-step record repository for tests and development
pub struct MockTwoStepRepository {
    records: Arc<RwLock<HashMap<Uuid, TwoStepRecord>>>,
}

impl MockTwoStepRepository {
    /// Create an empty mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository seeded with an existing record
    pub fn with_record(record: TwoStepRecord) -> Self {
        let mut records = HashMap::new();
        records.insert(record.user_id, record);
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Number of records currently stored
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for MockTwoStepRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TwoStepRepository for MockTwoStepRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<TwoStepRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&user_id).cloned())
    }

    async fn find_or_create(&self, record: TwoStepRecord) -> Result<TwoStepRecord, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.entry(record.user_id).or_insert(record).clone())
    }

    async fn save(&self, mut record: TwoStepRecord) -> Result<TwoStepRecord, DomainError> {
        let mut records = self.records.write().await;

        match records.get(&record.user_id) {
            None => Err(DomainError::NotFound {
                resource: format!("TwoStepRecord for user {}", record.user_id),
            }),
            Some(stored) if stored.version != record.version => Err(DomainError::Conflict {
                message: format!("Stale two-step record for user {}", record.user_id),
            }),
            Some(_) => {
                record.version += 1;
                records.insert(record.user_id, record.clone());
                Ok(record)
            }
        }
    }
}
