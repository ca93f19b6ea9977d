//! Default webhook event handlers.
//!
//! Each handler logs the fields of its event that matter for billing
//! follow-up. Persisting grants or notifying users is left to whoever
//! replaces these in the registry.

use async_trait::async_trait;

use crate::domain::billing::{WebhookError, WebhookEvent};
use crate::ports::WebhookEventHandler;

fn required<'a>(
    event: &'a WebhookEvent,
    handler: &'static str,
    keys: &[&str],
) -> Result<&'a str, WebhookError> {
    keys.iter()
        .find_map(|key| event.data_str(key).filter(|v| !v.is_empty()))
        .ok_or_else(|| WebhookError::handler_failure(handler, format!("missing {}", keys.join(" or "))))
}

/// `charge.success`: a payment settled.
pub struct ChargeSuccessHandler;

#[async_trait]
impl WebhookEventHandler for ChargeSuccessHandler {
    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        let reference = required(event, self.name(), &["reference"])?;
        let amount = event.amount().unwrap_or_default();

        tracing::info!(
            reference,
            amount_kobo = amount.value(),
            amount = %amount,
            customer_email = event.customer_email().unwrap_or("unknown"),
            channel = event.data_str("channel").unwrap_or("unknown"),
            "Payment succeeded"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "charge_success"
    }
}

/// `subscription.create`: a customer subscribed to a plan.
pub struct SubscriptionCreateHandler;

#[async_trait]
impl WebhookEventHandler for SubscriptionCreateHandler {
    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        let plan_code = event
            .data()
            .get("plan")
            .and_then(|p| p.get("plan_code"))
            .and_then(|c| c.as_str());

        tracing::info!(
            subscription_code = event.data_str("subscription_code").unwrap_or("unknown"),
            plan_code = plan_code.unwrap_or("unknown"),
            customer_email = event.customer_email().unwrap_or("unknown"),
            next_payment_date = event.data_str("next_payment_date"),
            "Subscription created"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "subscription_create"
    }
}

/// `subscription.disable`: a subscription was cancelled.
pub struct SubscriptionDisableHandler;

#[async_trait]
impl WebhookEventHandler for SubscriptionDisableHandler {
    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        tracing::info!(
            subscription_code = event.data_str("subscription_code").unwrap_or("unknown"),
            status = event.data_str("status").unwrap_or("unknown"),
            customer_email = event.customer_email().unwrap_or("unknown"),
            "Subscription cancelled"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "subscription_disable"
    }
}

/// `invoice.create`: an upcoming subscription charge was invoiced.
pub struct InvoiceCreateHandler;

#[async_trait]
impl WebhookEventHandler for InvoiceCreateHandler {
    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        let amount = event.amount().unwrap_or_default();

        tracing::info!(
            invoice_code = event.data_str("invoice_code").unwrap_or("unknown"),
            amount_kobo = amount.value(),
            amount = %amount,
            customer_email = event.customer_email().unwrap_or("unknown"),
            "Invoice created"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "invoice_create"
    }
}

/// `transfer.success`: a payout landed.
pub struct TransferSuccessHandler;

#[async_trait]
impl WebhookEventHandler for TransferSuccessHandler {
    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        let transfer = required(event, self.name(), &["transfer_code", "reference"])?;
        let amount = event.amount().unwrap_or_default();

        tracing::info!(
            transfer,
            amount_kobo = amount.value(),
            amount = %amount,
            "Transfer succeeded"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "transfer_success"
    }
}

/// `transfer.failed`: a payout failed and needs attention.
pub struct TransferFailedHandler;

#[async_trait]
impl WebhookEventHandler for TransferFailedHandler {
    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        let transfer = required(event, self.name(), &["transfer_code", "reference"])?;
        let amount = event.amount().unwrap_or_default();

        tracing::warn!(
            transfer,
            amount_kobo = amount.value(),
            amount = %amount,
            reason = event.data_str("reason").unwrap_or("unknown"),
            "Transfer failed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "transfer_failed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::PaystackWebhookVerifier;

    fn event(body: &str) -> WebhookEvent {
        let verifier = PaystackWebhookVerifier::new("sk_test_handlers");
        let signature = verifier.sign(body.as_bytes());
        let verified = verifier.verify(body.as_bytes(), Some(&signature)).unwrap();
        WebhookEvent::from_verified(verified).unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Charge Success Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn charge_success_with_reference_succeeds() {
        let event = event(
            r#"{"event":"charge.success","data":{"reference":"ref_1","amount":500000,"customer":{"email":"ada@example.ng"}}}"#,
        );

        assert!(ChargeSuccessHandler.handle(&event).await.is_ok());
    }

    #[tokio::test]
    async fn charge_success_without_reference_fails() {
        let event = event(r#"{"event":"charge.success","data":{"amount":500000}}"#);

        let err = ChargeSuccessHandler.handle(&event).await.unwrap_err();

        assert_eq!(
            err,
            WebhookError::handler_failure("charge_success", "missing reference")
        );
    }

    #[tokio::test]
    async fn charge_success_with_non_object_data_fails() {
        let event = event(r#"{"event":"charge.success","data":"oops"}"#);

        assert!(ChargeSuccessHandler.handle(&event).await.is_err());
    }

    // ══════════════════════════════════════════════════════════════
    // Subscription and Invoice Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn subscription_handlers_tolerate_sparse_data() {
        let created = event(r#"{"event":"subscription.create","data":{}}"#);
        let disabled = event(r#"{"event":"subscription.disable","data":{"subscription_code":"SUB_x"}}"#);
        let invoice = event(r#"{"event":"invoice.create","data":null}"#);

        assert!(SubscriptionCreateHandler.handle(&created).await.is_ok());
        assert!(SubscriptionDisableHandler.handle(&disabled).await.is_ok());
        assert!(InvoiceCreateHandler.handle(&invoice).await.is_ok());
    }

    // ══════════════════════════════════════════════════════════════
    // Transfer Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn transfer_handlers_accept_code_or_reference() {
        let by_code = event(r#"{"event":"transfer.success","data":{"transfer_code":"TRF_1"}}"#);
        let by_reference = event(r#"{"event":"transfer.failed","data":{"reference":"payout_7"}}"#);

        assert!(TransferSuccessHandler.handle(&by_code).await.is_ok());
        assert!(TransferFailedHandler.handle(&by_reference).await.is_ok());
    }

    #[tokio::test]
    async fn transfer_without_identifier_fails() {
        let event = event(r#"{"event":"transfer.failed","data":{"amount":100}}"#);

        let err = TransferFailedHandler.handle(&event).await.unwrap_err();

        assert_eq!(
            err,
            WebhookError::handler_failure("transfer_failed", "missing transfer_code or reference")
        );
    }
}
