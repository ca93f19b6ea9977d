//! Billing handlers.
//!
//! ## Commands
//! - Receiving Paystack webhooks
//! - Initializing payments
//!
//! ## Queries
//! - Verifying payments
//!
//! ## Background
//! - Sweeping expired webhook claims

mod event_handlers;
mod handler_registry;
mod initialize_payment;
mod payment_errors;
mod receive_webhook;
mod sweep_webhook_claims;
mod verify_payment;

pub use event_handlers::{
    ChargeSuccessHandler, InvoiceCreateHandler, SubscriptionCreateHandler,
    SubscriptionDisableHandler, TransferFailedHandler, TransferSuccessHandler,
};
pub use handler_registry::WebhookHandlerRegistry;
pub use initialize_payment::{
    generate_reference, InitializePaymentCommand, InitializePaymentHandler,
    InitializePaymentResult,
};
pub use payment_errors::{PaymentRequestError, MAX_REFERENCE_LEN};
pub use receive_webhook::{DispatchOutcome, ReceiveWebhookCommand, ReceiveWebhookHandler};
pub use sweep_webhook_claims::WebhookClaimSweeper;
pub use verify_payment::{VerifyPaymentHandler, VerifyPaymentQuery, VerifyPaymentResult};
