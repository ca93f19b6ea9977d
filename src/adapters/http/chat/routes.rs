//! Axum router configuration for chat endpoints.

use axum::{routing::post, Router};

use super::handlers::send_chat_message;
use crate::adapters::http::AppState;

/// Create the chat API router.
///
/// # Routes
/// - `POST /` - Send the conversation, get the assistant's reply
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/", post(send_chat_message))
}
