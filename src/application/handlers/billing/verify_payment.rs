//! VerifyPaymentHandler - Looks up a transaction by reference.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::payment_errors::{validate_reference, PaymentRequestError};
use crate::domain::foundation::Kobo;
use crate::ports::{PaymentProvider, TransactionStatus};

/// Query for a transaction's status.
#[derive(Debug, Clone)]
pub struct VerifyPaymentQuery {
    pub reference: String,
}

/// Transaction status as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyPaymentResult {
    pub reference: String,
    pub status: TransactionStatus,
    pub amount: Kobo,
    pub currency: String,
    pub customer_email: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Handler for verifying payments.
pub struct VerifyPaymentHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl VerifyPaymentHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(
        &self,
        query: VerifyPaymentQuery,
    ) -> Result<VerifyPaymentResult, PaymentRequestError> {
        let reference = query.reference.trim();
        validate_reference(reference)?;

        let verification = self.provider.verify_transaction(reference).await?;

        tracing::info!(
            reference = %verification.reference,
            status = ?verification.status,
            amount_kobo = verification.amount.value(),
            "Payment verified"
        );

        Ok(VerifyPaymentResult {
            reference: verification.reference,
            status: verification.status,
            amount: verification.amount,
            currency: verification.currency,
            customer_email: verification.customer_email,
            paid_at: verification.paid_at,
        })
    }
}
