//! Chat handlers.

mod send_chat_message;

pub use send_chat_message::{
    ChatError, ChatSettings, SendChatMessageCommand, SendChatMessageHandler,
    SendChatMessageResult, MAX_MESSAGES, MAX_MESSAGE_CHARS,
};
