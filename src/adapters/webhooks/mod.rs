//! Webhook infrastructure adapters.

mod in_memory;

pub use in_memory::InMemoryProcessedWebhookStore;
