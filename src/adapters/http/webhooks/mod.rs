//! HTTP adapter for inbound provider webhooks.
//!
//! - `POST /api/webhooks/paystack` - Receive a signed Paystack event

mod handlers;
mod routes;

pub use handlers::{receive_paystack_webhook, WebhookAck, WebhookApiError};
pub use routes::webhook_routes;
