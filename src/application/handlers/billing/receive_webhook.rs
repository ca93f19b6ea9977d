//! ReceiveWebhookHandler - Authenticates and dispatches Paystack webhooks.
//!
//! Only authentication failures are returned as errors. Once the signature
//! checks out, every outcome (including a malformed body or a failing
//! handler) is logged and returned as a `DispatchOutcome`, and the caller
//! acknowledges it.
//!
//! Deduplication limits: a redelivery that arrives while the first attempt
//! is still running is a `Duplicate` and is acknowledged. If that first
//! attempt then fails, its claim is released but the provider has no reason
//! to send the event again, because every authenticated delivery got a 200.
//! Releasing only helps deliveries that arrive later anyway (a lost
//! acknowledgement, a manual replay from the dashboard). Failed events have
//! to be picked up from the `HandlerFailed` logs.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use super::handler_registry::WebhookHandlerRegistry;
use crate::domain::billing::{PaystackWebhookVerifier, WebhookError, WebhookEvent};
use crate::ports::{ClaimResult, ProcessedWebhookStore, WebhookEventHandler};

/// Command carrying one inbound webhook delivery.
#[derive(Debug, Clone)]
pub struct ReceiveWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `x-paystack-signature` header value, if sent.
    pub signature: Option<String>,
}

/// What happened to an authenticated delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The handler ran and succeeded.
    Handled {
        event: String,
        handler: &'static str,
    },
    /// No handler for this event tag.
    Unrecognized { event: String },
    /// The same event was already claimed; the handler did not run.
    Duplicate { event: String, key: String },
    /// Body was not a `{ event, data }` envelope.
    Malformed { error: WebhookError },
    /// The handler returned an error, timed out or panicked.
    HandlerFailed { event: String, error: WebhookError },
}

impl DispatchOutcome {
    /// True if a handler ran to success.
    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Handled { .. })
    }
}

/// Handler for inbound webhook deliveries.
pub struct ReceiveWebhookHandler {
    verifier: Arc<PaystackWebhookVerifier>,
    registry: Arc<WebhookHandlerRegistry>,
    store: Arc<dyn ProcessedWebhookStore>,
    handler_timeout: Duration,
}

impl ReceiveWebhookHandler {
    pub fn new(
        verifier: Arc<PaystackWebhookVerifier>,
        registry: Arc<WebhookHandlerRegistry>,
        store: Arc<dyn ProcessedWebhookStore>,
        handler_timeout: Duration,
    ) -> Self {
        Self {
            verifier,
            registry,
            store,
            handler_timeout,
        }
    }

    /// Verifies, parses and dispatches one delivery.
    ///
    /// # Errors
    ///
    /// `MissingSignature` or `InvalidSignature`. Nothing is dispatched.
    pub async fn handle(&self, cmd: ReceiveWebhookCommand) -> Result<DispatchOutcome, WebhookError> {
        let verified = self
            .verifier
            .verify(&cmd.payload, cmd.signature.as_deref())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected webhook");
                e
            })?;

        let event = match WebhookEvent::from_verified(verified) {
            Ok(event) => event,
            Err(error) => {
                tracing::warn!(error = %error, "Authenticated webhook has malformed body");
                return Ok(DispatchOutcome::Malformed { error });
            }
        };

        let handler = match event.event_type().and_then(|t| self.registry.get(t)) {
            Some(handler) => handler.clone(),
            None => {
                tracing::info!(event = event.event(), "Unhandled webhook event");
                return Ok(DispatchOutcome::Unrecognized {
                    event: event.event().to_string(),
                });
            }
        };

        let claimed_key = match event.idempotency_key() {
            Some(key) => match self.store.claim(&key, event.event()).await {
                Ok(ClaimResult::Claimed) => Some(key),
                Ok(ClaimResult::AlreadyClaimed) => {
                    tracing::info!(event = event.event(), key = %key, "Duplicate webhook delivery");
                    return Ok(DispatchOutcome::Duplicate {
                        event: event.event().to_string(),
                        key,
                    });
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Idempotency store unavailable, dispatching without dedup");
                    None
                }
            },
            None => None,
        };

        let result = self.run_handler(handler.as_ref(), &event).await;

        match result {
            Ok(()) => {
                if let Some(key) = &claimed_key {
                    if let Err(e) = self.store.complete(key).await {
                        tracing::warn!(key = %key, error = %e, "Failed to mark webhook completed");
                    }
                }
                tracing::info!(
                    event = event.event(),
                    handler = handler.name(),
                    "Webhook handled"
                );
                Ok(DispatchOutcome::Handled {
                    event: event.event().to_string(),
                    handler: handler.name(),
                })
            }
            Err(error) => {
                if let Some(key) = &claimed_key {
                    if let Err(e) = self.store.release(key).await {
                        tracing::warn!(key = %key, error = %e, "Failed to release webhook claim");
                    }
                }
                tracing::error!(
                    event = event.event(),
                    handler = handler.name(),
                    error = %error,
                    "Webhook handler failed"
                );
                Ok(DispatchOutcome::HandlerFailed {
                    event: event.event().to_string(),
                    error,
                })
            }
        }
    }

    async fn run_handler(
        &self,
        handler: &dyn WebhookEventHandler,
        event: &WebhookEvent,
    ) -> Result<(), WebhookError> {
        let name = handler.name();
        let guarded = AssertUnwindSafe(handler.handle(event)).catch_unwind();

        match tokio::time::timeout(self.handler_timeout, guarded).await {
            Ok(Ok(result)) => result,
            Ok(Err(panic)) => Err(WebhookError::handler_failure(
                name,
                format!("panicked: {}", panic_message(panic.as_ref())),
            )),
            Err(_) => Err(WebhookError::handler_failure(
                name,
                format!("timed out after {}ms", self.handler_timeout.as_millis()),
            )),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
