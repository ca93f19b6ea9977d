//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Webhook Ports
//!
//! - `WebhookEventHandler` - Handler for one webhook event type
//! - `ProcessedWebhookStore` - Delivery deduplication
//!
//! ## Outbound Ports
//!
//! - `PaymentProvider` - Payment gateway pass-through
//! - `AIProvider` - LLM completion API

mod ai_provider;
mod payment_provider;
mod processed_webhook_store;
mod webhook_event_handler;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use payment_provider::{
    InitializeTransactionRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    TransactionInitialization, TransactionStatus, TransactionVerification,
};
pub use processed_webhook_store::{
    ClaimResult, ProcessedWebhookRecord, ProcessedWebhookStore, ProcessingStatus,
};
pub use webhook_event_handler::WebhookEventHandler;
