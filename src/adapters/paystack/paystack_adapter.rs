//! Paystack payment provider adapter.
//!
//! Implements the `PaymentProvider` trait over the Paystack REST API.
//!
//! # Security
//!
//! - Secret key held in `secrecy::SecretString`, exposed only for the
//!   `Authorization` header
//!
//! # Configuration
//!
//! ```ignore
//! let config = PaystackConfig::new(secret_key);
//! let adapter = PaystackPaymentAdapter::new(config)?;
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::api_types::{
    InitializeBody, PaystackEnvelope, PaystackInitialization, PaystackTransaction,
};
use crate::ports::{
    InitializeTransactionRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    TransactionInitialization, TransactionVerification,
};

/// Default Paystack API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

/// Paystack API configuration.
#[derive(Clone)]
pub struct PaystackConfig {
    /// Secret key (sk_live_... or sk_test_...).
    secret_key: SecretString,

    /// Base URL for the API.
    base_url: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl PaystackConfig {
    /// Create a new configuration with defaults.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Paystack payment provider adapter.
pub struct PaystackPaymentAdapter {
    config: PaystackConfig,
    http_client: reqwest::Client,
}

impl PaystackPaymentAdapter {
    /// Create a new adapter with the given configuration.
    pub fn new(config: PaystackConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<T, PaymentError> {
        let response = request
            .bearer_auth(self.config.secret_key.expose_secret())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(operation, error = %e, "Paystack request failed");
                PaymentError::network(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        parse_response(status, &body).map_err(|e| {
            tracing::warn!(
                operation,
                upstream_status = status,
                code = %e.code,
                error = %e.message,
                "Paystack returned an error"
            );
            e
        })
    }
}

/// Reads a Paystack response body.
///
/// Non-2xx statuses keep the upstream status; a 2xx with `status: false`
/// or an unreadable body has none.
fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, PaymentError> {
    let envelope = serde_json::from_str::<PaystackEnvelope>(body);

    if !(200..300).contains(&status) {
        let message = match envelope {
            Ok(envelope) if !envelope.message.is_empty() => envelope.message,
            _ => format!("Paystack API error (HTTP {})", status),
        };
        return Err(PaymentError::from_status(status, message));
    }

    let envelope = envelope.map_err(|e| {
        PaymentError::invalid_response(format!("Failed to parse Paystack response: {}", e))
    })?;

    if !envelope.status {
        return Err(PaymentError::new(
            PaymentErrorCode::ProviderError,
            format!("Paystack rejected the request: {}", envelope.message),
        ));
    }

    let data = envelope
        .data
        .ok_or_else(|| PaymentError::invalid_response("Paystack response has no data"))?;

    serde_json::from_value(data).map_err(|e| {
        PaymentError::invalid_response(format!("Unexpected Paystack data: {}", e))
    })
}

#[async_trait]
impl PaymentProvider for PaystackPaymentAdapter {
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<TransactionInitialization, PaymentError> {
        let url = format!("{}/transaction/initialize", self.config.base_url);

        let body = InitializeBody {
            email: &request.email,
            amount: request.amount,
            reference: &request.reference,
            callback_url: &request.callback_url,
            currency: "NGN",
            plan: request.plan.as_deref(),
            metadata: request.metadata.as_ref(),
        };

        let data: PaystackInitialization = self
            .send(self.http_client.post(&url).json(&body), "initialize_transaction")
            .await?;

        Ok(data.into())
    }

    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<TransactionVerification, PaymentError> {
        let url = format!("{}/transaction/verify/{}", self.config.base_url, reference);

        let data: PaystackTransaction = self
            .send(self.http_client.get(&url), "verify_transaction")
            .await?;

        Ok(data.into())
    }
}
