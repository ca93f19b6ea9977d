//! Payment provider port for external payment processing.
//!
//! Defines the contract for the payment gateway (Paystack). The service
//! only passes requests through: it starts hosted checkouts and looks up
//! transactions by reference. Amounts are always kobo.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::Kobo;

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Start a transaction and get a hosted checkout URL.
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<TransactionInitialization, PaymentError>;

    /// Look up a transaction by its reference.
    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<TransactionVerification, PaymentError>;
}

/// Request to initialize a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeTransactionRequest {
    /// Customer email.
    pub email: String,

    /// Amount to charge.
    pub amount: Kobo,

    /// Unique transaction reference.
    pub reference: String,

    /// Where the provider redirects the customer afterwards.
    pub callback_url: String,

    /// Subscription plan code, for recurring billing.
    pub plan: Option<String>,

    /// Arbitrary metadata echoed back in webhooks.
    pub metadata: Option<Value>,
}

/// Hosted checkout returned by initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInitialization {
    /// URL for the customer to complete payment.
    pub authorization_url: String,

    /// Access code for inline checkout.
    pub access_code: String,

    /// Transaction reference.
    pub reference: String,
}

/// Transaction details returned by verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionVerification {
    /// Transaction reference.
    pub reference: String,

    /// Current status.
    pub status: TransactionStatus,

    /// Amount charged.
    pub amount: Kobo,

    /// ISO currency code (usually `NGN`).
    pub currency: String,

    /// Customer email, if the provider returned one.
    pub customer_email: Option<String>,

    /// When the payment settled.
    pub paid_at: Option<DateTime<Utc>>,

    /// Provider's human-readable outcome ("Approved", "Declined", ...).
    pub gateway_response: Option<String>,
}

/// Transaction status from the payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Payment completed.
    Success,

    /// Payment was attempted and failed.
    Failed,

    /// Customer left the checkout.
    Abandoned,

    /// Payment is still in flight.
    Pending,

    /// Payment was reversed after success.
    Reversed,

    /// Unknown status from provider.
    Unknown,
}

impl TransactionStatus {
    /// Maps the provider's status string.
    pub fn from_provider(status: &str) -> Self {
        match status {
            "success" => TransactionStatus::Success,
            "failed" => TransactionStatus::Failed,
            "abandoned" => TransactionStatus::Abandoned,
            "pending" | "ongoing" | "processing" | "queued" => TransactionStatus::Pending,
            "reversed" => TransactionStatus::Reversed,
            _ => TransactionStatus::Unknown,
        }
    }

    /// True once the payment has settled successfully.
    pub fn is_paid(&self) -> bool {
        matches!(self, TransactionStatus::Success)
    }
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// HTTP status the provider answered with, if it answered.
    pub upstream_status: Option<u16>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            upstream_status: None,
            retryable: code.is_retryable(),
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidResponse, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(PaymentErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Create an error from a non-success provider response.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            400 | 422 => PaymentErrorCode::InvalidRequest,
            401 | 403 => PaymentErrorCode::AuthenticationError,
            404 => PaymentErrorCode::NotFound,
            429 => PaymentErrorCode::RateLimitExceeded,
            500..=599 => PaymentErrorCode::ProviderError,
            _ => PaymentErrorCode::Unknown,
        };
        let mut err = Self::new(code, message);
        err.upstream_status = Some(status);
        err
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Provider rejected the request parameters.
    InvalidRequest,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Provider answered with something we could not read.
    InvalidResponse,

    /// Provider API error.
    ProviderError,

    /// Unknown error.
    Unknown,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError
                | PaymentErrorCode::RateLimitExceeded
                | PaymentErrorCode::ProviderError
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::InvalidResponse => "invalid_response",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
