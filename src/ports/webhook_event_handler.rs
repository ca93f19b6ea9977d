//! WebhookEventHandler port - Interface for per-event webhook handlers.
//!
//! The receiver looks up one handler per recognized event type and awaits
//! it with a timeout. Handler errors are logged by the receiver and never
//! reach the provider.

use async_trait::async_trait;

use crate::domain::billing::{WebhookError, WebhookEvent};

/// Handler for one kind of authenticated webhook event.
///
/// Implementations should be:
/// - **Idempotent** - the provider may redeliver an event
/// - **Quick** - the provider waits on our response
///
/// # Example
///
/// ```ignore
/// struct ChargeSuccessHandler;
///
/// #[async_trait]
/// impl WebhookEventHandler for ChargeSuccessHandler {
///     async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
///         let reference = event
///             .data_str("reference")
///             .ok_or_else(|| WebhookError::handler_failure(self.name(), "missing reference"))?;
///         // Grant access for the paid reference...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "charge_success"
///     }
/// }
/// ```
#[async_trait]
pub trait WebhookEventHandler: Send + Sync {
    /// Process an authenticated event.
    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}
