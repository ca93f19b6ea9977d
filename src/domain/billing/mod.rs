//! Billing domain module.
//!
//! Authenticates and parses Paystack webhook notifications.
//!
//! # Module Structure
//!
//! - `webhook_errors` - Error taxonomy and response status mapping
//! - `webhook_event` - Event tags and the parsed event
//! - `webhook_verifier` - HMAC-SHA512 signature check

mod webhook_errors;
mod webhook_event;
mod webhook_verifier;

pub use webhook_errors::WebhookError;
pub use webhook_event::{WebhookEvent, WebhookEventType};
pub use webhook_verifier::{PaystackWebhookVerifier, VerifiedPayload, SIGNATURE_HEADER};
