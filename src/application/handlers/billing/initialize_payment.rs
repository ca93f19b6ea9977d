//! InitializePaymentHandler - Starts a hosted checkout with the provider.

use serde_json::Value;
use std::sync::Arc;

use super::payment_errors::{validate_email, validate_reference, PaymentRequestError};
use crate::domain::foundation::Kobo;
use crate::ports::{InitializeTransactionRequest, PaymentProvider};

/// Command to initialize a payment.
#[derive(Debug, Clone)]
pub struct InitializePaymentCommand {
    /// Customer email.
    pub email: String,
    /// Amount to charge.
    pub amount: Kobo,
    /// Subscription plan code, if this is a subscription checkout.
    pub plan: Option<String>,
    /// Metadata echoed back in webhooks.
    pub metadata: Option<Value>,
    /// Caller-chosen reference; generated when absent.
    pub reference: Option<String>,
}

/// Result of payment initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializePaymentResult {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

/// Handler for initializing payments.
pub struct InitializePaymentHandler {
    provider: Arc<dyn PaymentProvider>,
    callback_url: String,
}

impl InitializePaymentHandler {
    /// Creates the handler. The provider redirects customers to
    /// `<public_base_url>/payment/callback` after checkout.
    pub fn new(provider: Arc<dyn PaymentProvider>, public_base_url: &str) -> Self {
        Self {
            provider,
            callback_url: format!("{}/payment/callback", public_base_url.trim_end_matches('/')),
        }
    }

    pub async fn handle(
        &self,
        cmd: InitializePaymentCommand,
    ) -> Result<InitializePaymentResult, PaymentRequestError> {
        // 1. Validate before any outbound call
        let email = cmd.email.trim().to_string();
        validate_email(&email)?;
        if cmd.amount.is_zero() {
            return Err(PaymentRequestError::InvalidAmount);
        }
        let reference = match cmd.reference {
            Some(reference) => {
                validate_reference(&reference)?;
                reference
            }
            None => generate_reference(),
        };

        // 2. Start the transaction
        let request = InitializeTransactionRequest {
            email,
            amount: cmd.amount,
            reference,
            callback_url: self.callback_url.clone(),
            plan: cmd.plan.filter(|p| !p.trim().is_empty()),
            metadata: cmd.metadata,
        };
        let initialization = self.provider.initialize_transaction(request).await?;

        tracing::info!(
            reference = %initialization.reference,
            amount_kobo = cmd.amount.value(),
            "Payment initialized"
        );

        Ok(InitializePaymentResult {
            authorization_url: initialization.authorization_url,
            access_code: initialization.access_code,
            reference: initialization.reference,
        })
    }
}

/// Generates a unique transaction reference (`NGN-<32 hex chars>`).
pub fn generate_reference() -> String {
    format!("NGN-{}", uuid::Uuid::new_v4().simple())
}
