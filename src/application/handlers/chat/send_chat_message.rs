//! SendChatMessageHandler - One assistant turn over a client-held conversation.
//!
//! The conversation lives on the client; every request carries the full
//! history. The handler validates it, classifies the latest user message,
//! and makes a single completion call.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::chat::{ChatIntent, SuggestedAction};
use crate::ports::{AIError, AIProvider, CompletionRequest, Message, MessageRole};

/// Longest accepted message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4_000;

/// Most messages accepted per request.
pub const MAX_MESSAGES: usize = 50;

const SYSTEM_PROMPT: &str = "You are the assistant for a Nigerian SaaS product. \
Customers pay in naira (₦) through Paystack by card, bank transfer or USSD. \
Keep answers short and friendly, use Nigerian English, and never ask for card numbers, PINs or OTPs. \
If you do not know something about the customer's account, say so and suggest contacting support.";

/// Errors from a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Conversation must contain at least one message")]
    EmptyConversation,

    #[error("Too many messages: {count} (max {max})")]
    TooManyMessages { count: usize, max: usize },

    #[error("Message {index} is empty")]
    EmptyMessage { index: usize },

    #[error("Message {index} exceeds {max} characters")]
    MessageTooLong { index: usize, max: usize },

    #[error("Last message must be from the user")]
    LastMessageNotFromUser,

    #[error("AI provider error: {0}")]
    Upstream(#[from] AIError),
}

/// Command carrying the conversation so far.
#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub messages: Vec<Message>,
}

/// The assistant's reply plus UI hints.
#[derive(Debug, Clone, PartialEq)]
pub struct SendChatMessageResult {
    pub reply: String,
    pub intent: ChatIntent,
    pub suggested_actions: Vec<SuggestedAction>,
    pub model: String,
}

/// Generation limits for chat completions.
#[derive(Debug, Clone, Copy)]
pub struct ChatSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Handler for chat turns.
pub struct SendChatMessageHandler {
    provider: Arc<dyn AIProvider>,
    settings: ChatSettings,
}

impl SendChatMessageHandler {
    pub fn new(provider: Arc<dyn AIProvider>, settings: ChatSettings) -> Self {
        Self { provider, settings }
    }

    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
    ) -> Result<SendChatMessageResult, ChatError> {
        // 1. Validate the conversation
        validate_conversation(&cmd.messages)?;

        // 2. Classify the latest user message
        let latest = cmd
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let intent = ChatIntent::classify(latest);

        // 3. One completion call
        let request = CompletionRequest::new()
            .with_system_prompt(format!("{}\n\n{}", SYSTEM_PROMPT, intent.prompt_hint()))
            .with_messages(cmd.messages)
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);

        let response = self.provider.complete(request).await?;

        tracing::info!(
            intent = %intent,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            "Chat reply generated"
        );

        Ok(SendChatMessageResult {
            reply: response.content,
            intent,
            suggested_actions: intent.suggested_actions().to_vec(),
            model: response.model,
        })
    }
}

fn validate_conversation(messages: &[Message]) -> Result<(), ChatError> {
    if messages.is_empty() {
        return Err(ChatError::EmptyConversation);
    }
    if messages.len() > MAX_MESSAGES {
        return Err(ChatError::TooManyMessages {
            count: messages.len(),
            max: MAX_MESSAGES,
        });
    }
    for (index, message) in messages.iter().enumerate() {
        if message.content.trim().is_empty() {
            return Err(ChatError::EmptyMessage { index });
        }
        if message.content.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ChatError::MessageTooLong {
                index,
                max: MAX_MESSAGE_CHARS,
            });
        }
    }
    match messages.last() {
        Some(last) if last.role == MessageRole::User => Ok(()),
        _ => Err(ChatError::LastMessageNotFromUser),
    }
}
