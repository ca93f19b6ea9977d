//! WebhookHandlerRegistry - Maps event types to their handlers.

use std::collections::HashMap;
use std::sync::Arc;

use super::event_handlers::{
    ChargeSuccessHandler, InvoiceCreateHandler, SubscriptionCreateHandler,
    SubscriptionDisableHandler, TransferFailedHandler, TransferSuccessHandler,
};
use crate::domain::billing::WebhookEventType;
use crate::ports::WebhookEventHandler;

/// Event type to handler table, built once at startup.
///
/// At most one handler per event type; registering again replaces the
/// previous handler.
#[derive(Clone, Default)]
pub struct WebhookHandlerRegistry {
    handlers: HashMap<WebhookEventType, Arc<dyn WebhookEventHandler>>,
}

impl WebhookHandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the logging handler for every known event type.
    pub fn with_default_handlers() -> Self {
        Self::new()
            .register(WebhookEventType::ChargeSuccess, Arc::new(ChargeSuccessHandler))
            .register(WebhookEventType::SubscriptionCreate, Arc::new(SubscriptionCreateHandler))
            .register(WebhookEventType::SubscriptionDisable, Arc::new(SubscriptionDisableHandler))
            .register(WebhookEventType::InvoiceCreate, Arc::new(InvoiceCreateHandler))
            .register(WebhookEventType::TransferSuccess, Arc::new(TransferSuccessHandler))
            .register(WebhookEventType::TransferFailed, Arc::new(TransferFailedHandler))
    }

    /// Sets the handler for an event type.
    pub fn register(
        mut self,
        event_type: WebhookEventType,
        handler: Arc<dyn WebhookEventHandler>,
    ) -> Self {
        self.handlers.insert(event_type, handler);
        self
    }

    /// Looks up the handler for an event type.
    pub fn get(&self, event_type: WebhookEventType) -> Option<&Arc<dyn WebhookEventHandler>> {
        self.handlers.get(&event_type)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for WebhookHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self
            .handlers
            .iter()
            .map(|(event_type, handler)| (event_type.as_str(), handler.name()))
            .collect();
        names.sort();
        f.debug_struct("WebhookHandlerRegistry")
            .field("handlers", &names)
            .finish()
    }
}
