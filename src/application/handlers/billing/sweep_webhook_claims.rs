//! WebhookClaimSweeper - Periodically deletes expired delivery claims.
//!
//! Keeps the idempotency store bounded in a long-running process. A claim
//! only has to outlive the provider's redelivery window, so anything older
//! than the retention period is dropped.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time;

use crate::domain::billing::WebhookError;
use crate::ports::ProcessedWebhookStore;

/// Background task that applies the claim retention policy.
pub struct WebhookClaimSweeper {
    store: Arc<dyn ProcessedWebhookStore>,
    retention: Duration,
    interval: Duration,
}

impl WebhookClaimSweeper {
    pub fn new(store: Arc<dyn ProcessedWebhookStore>, retention: Duration, interval: Duration) -> Self {
        Self {
            store,
            retention,
            interval,
        }
    }

    /// Sweeps on every interval tick until `shutdown` turns true.
    ///
    /// Store errors are logged and the next tick tries again.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.interval);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Webhook claim sweeper stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::warn!(error = %e, "Webhook claim sweep failed");
                    }
                }
            }
        }
    }

    /// Deletes claims older than the retention period.
    ///
    /// Returns the number of claims deleted.
    pub async fn sweep_once(&self) -> Result<u64, WebhookError> {
        let retention = chrono::Duration::from_std(self.retention)
            .map_err(|e| WebhookError::StorageError(format!("retention out of range: {}", e)))?;
        let cutoff = Utc::now() - retention;

        let deleted = self.store.delete_before(cutoff).await?;
        if deleted > 0 {
            tracing::info!(deleted, %cutoff, "Swept expired webhook claims");
        }
        Ok(deleted)
    }
}
