//! Shared application state for every HTTP route.

use std::sync::Arc;

use crate::application::handlers::billing::{
    InitializePaymentHandler, ReceiveWebhookHandler, VerifyPaymentHandler,
};
use crate::application::handlers::chat::SendChatMessageHandler;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; the handlers are built once at startup and
/// shared through `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub receive_webhook: Arc<ReceiveWebhookHandler>,
    pub initialize_payment: Arc<InitializePaymentHandler>,
    pub verify_payment: Arc<VerifyPaymentHandler>,
    pub send_chat_message: Arc<SendChatMessageHandler>,
}
