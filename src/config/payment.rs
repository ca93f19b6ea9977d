//! Payment configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::is_http_url;

/// Payment configuration (Paystack)
///
/// The secret key authenticates API calls and also signs webhooks.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Paystack secret key (`sk_test_...` or `sk_live_...`)
    #[serde(default)]
    pub paystack_secret_key: String,

    /// Paystack public key, handed to frontends for inline checkout
    pub paystack_public_key: Option<String>,

    /// Paystack API base URL
    #[serde(default = "default_base_url")]
    pub paystack_base_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PaymentConfig {
    /// Check if using Paystack test mode
    pub fn is_test_mode(&self) -> bool {
        self.paystack_secret_key.starts_with("sk_test_")
    }

    /// Check if using Paystack live mode
    pub fn is_live_mode(&self) -> bool {
        self.paystack_secret_key.starts_with("sk_live_")
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.paystack_secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__PAYSTACK_SECRET_KEY"));
        }

        // Verify key prefixes for safety
        if !self.is_test_mode() && !self.is_live_mode() {
            return Err(ValidationError::InvalidPaystackSecretKey);
        }
        if let Some(public_key) = &self.paystack_public_key {
            if !public_key.starts_with("pk_test_") && !public_key.starts_with("pk_live_") {
                return Err(ValidationError::InvalidPaystackPublicKey);
            }
        }

        if !is_http_url(&self.paystack_base_url) {
            return Err(ValidationError::InvalidUrl {
                field: "PAYMENT__PAYSTACK_BASE_URL",
                value: self.paystack_base_url.clone(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            paystack_secret_key: String::new(),
            paystack_public_key: None,
            paystack_base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    crate::adapters::paystack::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}
