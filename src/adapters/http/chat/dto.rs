//! HTTP DTOs for chat endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::chat::SendChatMessageResult;
use crate::domain::chat::{ChatIntent, SuggestedAction};
use crate::ports::{Message, MessageRole};

/// One message of the client-held conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageDto {
    pub role: MessageRole,
    pub content: String,
}

impl From<ChatMessageDto> for Message {
    fn from(dto: ChatMessageDto) -> Self {
        Message::new(dto.role, dto.content)
    }
}

/// Request carrying the conversation so far, oldest first.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessageDto>,
}

/// The assistant's reply plus UI hints.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub intent: ChatIntent,
    pub suggested_actions: Vec<SuggestedAction>,
    pub model: String,
}

impl From<SendChatMessageResult> for ChatResponse {
    fn from(result: SendChatMessageResult) -> Self {
        Self {
            reply: result.reply,
            intent: result.intent,
            suggested_actions: result.suggested_actions,
            model: result.model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_deserializes() {
        let json = r#"{"messages": [
            {"role": "assistant", "content": "Hi! How can I help?"},
            {"role": "user", "content": "How much is the pro plan?"}
        ]}"#;

        let req: ChatRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[1].role, MessageRole::User);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let json = r#"{"messages": [{"role": "tool", "content": "x"}]}"#;
        assert!(serde_json::from_str::<ChatRequest>(json).is_err());
    }

    #[test]
    fn chat_response_serializes_intent_and_actions() {
        let response = ChatResponse {
            reply: "Our plans start at ₦5,000.".to_string(),
            intent: ChatIntent::Pricing,
            suggested_actions: ChatIntent::Pricing.suggested_actions().to_vec(),
            model: "gpt-4o-mini".to_string(),
        };

        let json = serde_json::to_value(response).unwrap();

        assert_eq!(json["intent"], "pricing");
        assert_eq!(json["suggested_actions"][0]["action"], "view_plans");
    }
}
