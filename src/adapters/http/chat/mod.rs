//! HTTP adapter for the chat assistant.
//!
//! - `POST /api/chat` - One assistant turn over a client-held conversation

pub mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::{send_chat_message, ChatApiError};
pub use routes::chat_routes;
