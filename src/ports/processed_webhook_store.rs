//! ProcessedWebhookStore port - Interface for webhook delivery deduplication.
//!
//! Paystack may deliver the same event more than once:
//! - We answered slowly and the provider timed out
//! - Our acknowledgment was lost on the way back
//! - The event was replayed from the dashboard
//!
//! The receiver claims a key before running the handler. A key that is
//! already claimed means the delivery is a duplicate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::billing::WebhookError;

/// Processing state of a claimed delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    /// A handler is running for this key.
    Processing,
    /// The handler finished successfully.
    Completed,
}

/// Record of a claimed webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedWebhookRecord {
    /// Dedup key (`<event>:<provider reference>`).
    pub key: String,

    /// Event tag (e.g., "charge.success").
    pub event_type: String,

    /// Current state.
    pub status: ProcessingStatus,

    /// When the key was claimed.
    pub claimed_at: DateTime<Utc>,

    /// When the handler finished, once completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProcessedWebhookRecord {
    /// Creates a fresh claim.
    pub fn processing(key: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            event_type: event_type.into(),
            status: ProcessingStatus::Processing,
            claimed_at: Utc::now(),
            completed_at: None,
        }
    }

    /// True if the record finished, or was claimed and abandoned, before `cutoff`.
    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        match self.status {
            ProcessingStatus::Completed => self.completed_at.unwrap_or(self.claimed_at) < cutoff,
            ProcessingStatus::Processing => self.claimed_at < cutoff,
        }
    }

    /// Marks the record completed.
    pub fn complete(&mut self) {
        self.status = ProcessingStatus::Completed;
        self.completed_at = Some(Utc::now());
    }
}

/// Result of attempting to claim a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimResult {
    /// This delivery owns the key.
    Claimed,
    /// Another delivery already claimed or completed the key.
    AlreadyClaimed,
}

/// Port for claiming webhook deliveries.
///
/// `claim` must be atomic: of two concurrent claims for the same key,
/// exactly one gets `Claimed`. A database implementation would use a
/// PRIMARY KEY on `key` with `ON CONFLICT DO NOTHING`.
#[async_trait]
pub trait ProcessedWebhookStore: Send + Sync {
    /// Claim a key before running its handler.
    async fn claim(&self, key: &str, event_type: &str) -> Result<ClaimResult, WebhookError>;

    /// Mark a claimed key as successfully processed.
    async fn complete(&self, key: &str) -> Result<(), WebhookError>;

    /// Drop a claim so a redelivery can be processed.
    async fn release(&self, key: &str) -> Result<(), WebhookError>;

    /// Look up a key.
    async fn find(&self, key: &str) -> Result<Option<ProcessedWebhookRecord>, WebhookError>;

    /// Delete old records (retention policy).
    ///
    /// Removes records completed before `cutoff`, and claims made before
    /// `cutoff` that never finished. Returns the number of records deleted.
    async fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<u64, WebhookError>;
}
