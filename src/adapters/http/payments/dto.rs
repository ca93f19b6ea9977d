//! HTTP DTOs for payment endpoints.
//!
//! Amounts cross the wire as integer kobo. The verify response adds the
//! naira figure for display only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::handlers::billing::{InitializePaymentResult, VerifyPaymentResult};
use crate::ports::TransactionStatus;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a hosted checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializePaymentRequest {
    /// Customer email.
    pub email: String,
    /// Amount in kobo.
    pub amount_kobo: u64,
    /// Subscription plan code.
    #[serde(default)]
    pub plan: Option<String>,
    /// Metadata echoed back in webhooks.
    #[serde(default)]
    pub metadata: Option<Value>,
    /// Caller-chosen reference; one is generated when absent.
    #[serde(default)]
    pub reference: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Hosted checkout details.
#[derive(Debug, Clone, Serialize)]
pub struct InitializePaymentResponse {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

impl From<InitializePaymentResult> for InitializePaymentResponse {
    fn from(result: InitializePaymentResult) -> Self {
        Self {
            authorization_url: result.authorization_url,
            access_code: result.access_code,
            reference: result.reference,
        }
    }
}

/// Transaction status as reported by the provider.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub reference: String,
    pub status: TransactionStatus,
    pub amount_kobo: u64,
    pub amount_naira: f64,
    pub currency: String,
    pub customer_email: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<VerifyPaymentResult> for VerifyPaymentResponse {
    fn from(result: VerifyPaymentResult) -> Self {
        Self {
            reference: result.reference,
            status: result.status,
            amount_kobo: result.amount.value(),
            amount_naira: result.amount.as_naira(),
            currency: result.currency,
            customer_email: result.customer_email,
            paid_at: result.paid_at,
        }
    }
}
