//! Paystack webhook event types.
//!
//! An event is `{ "event": "<tag>", "data": { ... } }`. The shape of `data`
//! varies per tag and is not validated here; handlers pull out the fields
//! they need.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::webhook_errors::WebhookError;
use super::webhook_verifier::VerifiedPayload;
use crate::domain::foundation::Kobo;

/// Event tags the service has handlers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    /// A charge (card, bank, transfer) settled successfully.
    #[serde(rename = "charge.success")]
    ChargeSuccess,

    /// A subscription was created for a customer.
    #[serde(rename = "subscription.create")]
    SubscriptionCreate,

    /// A subscription was cancelled.
    #[serde(rename = "subscription.disable")]
    SubscriptionDisable,

    /// An invoice was raised for an upcoming subscription charge.
    #[serde(rename = "invoice.create")]
    InvoiceCreate,

    /// A payout transfer completed.
    #[serde(rename = "transfer.success")]
    TransferSuccess,

    /// A payout transfer failed.
    #[serde(rename = "transfer.failed")]
    TransferFailed,
}

impl WebhookEventType {
    /// Every handled event type.
    pub const ALL: [WebhookEventType; 6] = [
        WebhookEventType::ChargeSuccess,
        WebhookEventType::SubscriptionCreate,
        WebhookEventType::SubscriptionDisable,
        WebhookEventType::InvoiceCreate,
        WebhookEventType::TransferSuccess,
        WebhookEventType::TransferFailed,
    ];

    /// Looks up an event type by its exact wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// Returns the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEventType::ChargeSuccess => "charge.success",
            WebhookEventType::SubscriptionCreate => "subscription.create",
            WebhookEventType::SubscriptionDisable => "subscription.disable",
            WebhookEventType::InvoiceCreate => "invoice.create",
            WebhookEventType::TransferSuccess => "transfer.success",
            WebhookEventType::TransferFailed => "transfer.failed",
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    event: String,
    data: Value,
}

/// An authenticated, parsed webhook event.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    event: String,
    event_type: Option<WebhookEventType>,
    data: Value,
}

impl WebhookEvent {
    /// Parses a verified payload into an event.
    ///
    /// # Errors
    ///
    /// `MalformedPayload` if the body is not JSON or lacks `event`/`data`.
    pub fn from_verified(payload: VerifiedPayload<'_>) -> Result<Self, WebhookError> {
        let raw: RawEvent = serde_json::from_slice(payload.as_bytes())
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

        Ok(Self {
            event_type: WebhookEventType::from_tag(&raw.event),
            event: raw.event,
            data: raw.data,
        })
    }

    /// The event tag as sent by the provider.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The recognized event type, or `None` for tags we don't handle.
    pub fn event_type(&self) -> Option<WebhookEventType> {
        self.event_type
    }

    /// The event-specific payload.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// String field at the top level of `data`.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Amount in kobo, if present.
    pub fn amount(&self) -> Option<Kobo> {
        self.data.get("amount").and_then(Value::as_u64).map(Kobo::new)
    }

    /// Customer email from `data.customer.email`.
    pub fn customer_email(&self) -> Option<&str> {
        self.data
            .get("customer")
            .and_then(|c| c.get("email"))
            .and_then(Value::as_str)
    }

    /// Provider reference identifying the underlying object.
    ///
    /// Checked in order: `reference`, `subscription_code`, `invoice_code`,
    /// `transfer_code`, then numeric `id`.
    pub fn provider_reference(&self) -> Option<String> {
        ["reference", "subscription_code", "invoice_code", "transfer_code"]
            .iter()
            .find_map(|key| self.data_str(key).filter(|s| !s.is_empty()))
            .map(str::to_string)
            .or_else(|| {
                self.data
                    .get("id")
                    .and_then(Value::as_u64)
                    .map(|id| id.to_string())
            })
    }

    /// Key used to detect redelivery of the same event.
    pub fn idempotency_key(&self) -> Option<String> {
        self.provider_reference()
            .map(|reference| format!("{}:{}", self.event, reference))
    }
}
