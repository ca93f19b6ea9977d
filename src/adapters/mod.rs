//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes, handlers and DTOs
//! - `paystack` - Paystack REST API
//! - `ai` - OpenAI chat completions
//! - `webhooks` - Webhook delivery deduplication

pub mod ai;
pub mod http;
pub mod paystack;
pub mod webhooks;
