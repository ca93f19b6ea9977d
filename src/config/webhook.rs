//! Webhook dispatch configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Webhook dispatch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Longest a single event handler may run, in seconds
    #[serde(default = "default_handler_timeout")]
    pub handler_timeout_secs: u64,

    /// How long delivery claims are kept for deduplication, in seconds
    #[serde(default = "default_dedup_retention")]
    pub dedup_retention_secs: u64,

    /// How often expired claims are swept, in seconds
    #[serde(default = "default_dedup_sweep_interval")]
    pub dedup_sweep_interval_secs: u64,
}

impl WebhookConfig {
    /// Get handler timeout as Duration
    pub fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout_secs)
    }

    /// Get dedup retention as Duration
    pub fn dedup_retention(&self) -> Duration {
        Duration::from_secs(self.dedup_retention_secs)
    }

    /// Get sweep interval as Duration
    pub fn dedup_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.dedup_sweep_interval_secs)
    }

    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.handler_timeout_secs == 0 || self.handler_timeout_secs > 60 {
            return Err(ValidationError::InvalidHandlerTimeout);
        }
        // A claim still running must never look abandoned to the sweep
        if self.dedup_retention_secs <= self.handler_timeout_secs {
            return Err(ValidationError::InvalidDedupRetention);
        }
        if self.dedup_sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            handler_timeout_secs: default_handler_timeout(),
            dedup_retention_secs: default_dedup_retention(),
            dedup_sweep_interval_secs: default_dedup_sweep_interval(),
        }
    }
}

fn default_handler_timeout() -> u64 {
    10
}

fn default_dedup_retention() -> u64 {
    86_400
}

fn default_dedup_sweep_interval() -> u64 {
    300
}
