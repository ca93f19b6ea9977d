//! In-memory processed webhook store.
//!
//! Claims live until the retention sweep deletes them or the process exits.
//! Restarting the service forgets them, so a redelivery that arrives after
//! a restart is processed again.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::billing::WebhookError;
use crate::ports::{ClaimResult, ProcessedWebhookRecord, ProcessedWebhookStore};

/// Processed webhook store backed by a `HashMap`.
///
/// Claiming takes the write lock for the check-and-insert, so concurrent
/// claims for one key resolve to exactly one `Claimed`.
#[derive(Default)]
pub struct InMemoryProcessedWebhookStore {
    records: RwLock<HashMap<String, ProcessedWebhookRecord>>,
}

impl InMemoryProcessedWebhookStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True if no keys are held.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ProcessedWebhookStore for InMemoryProcessedWebhookStore {
    async fn claim(&self, key: &str, event_type: &str) -> Result<ClaimResult, WebhookError> {
        let mut records = self.records.write().await;
        if records.contains_key(key) {
            return Ok(ClaimResult::AlreadyClaimed);
        }
        records.insert(
            key.to_string(),
            ProcessedWebhookRecord::processing(key, event_type),
        );
        Ok(ClaimResult::Claimed)
    }

    async fn complete(&self, key: &str) -> Result<(), WebhookError> {
        let mut records = self.records.write().await;
        match records.get_mut(key) {
            Some(record) => {
                record.complete();
                Ok(())
            }
            None => Err(WebhookError::StorageError(format!(
                "no claim for key {}",
                key
            ))),
        }
    }

    async fn release(&self, key: &str) -> Result<(), WebhookError> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn find(&self, key: &str) -> Result<Option<ProcessedWebhookRecord>, WebhookError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, WebhookError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_older_than(cutoff));
        Ok((before - records.len()) as u64)
    }
}
