//! HTTP handlers for chat endpoints.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::dto::{ChatRequest, ChatResponse};
use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::AppState;
use crate::application::handlers::chat::{ChatError, SendChatMessageCommand};
use crate::ports::AIError;

/// POST /api/chat - Send the conversation, get the assistant's reply
pub async fn send_chat_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let cmd = SendChatMessageCommand {
        messages: request.messages.into_iter().map(Into::into).collect(),
    };

    let result = state.send_chat_message.handle(cmd).await?;

    Ok(Json(ChatResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts chat errors to HTTP responses.
#[derive(Debug)]
pub struct ChatApiError(ChatError);

impl From<ChatError> for ChatApiError {
    fn from(err: ChatError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let message = self.0.to_string();
        let upstream = match &self.0 {
            ChatError::EmptyConversation
            | ChatError::TooManyMessages { .. }
            | ChatError::EmptyMessage { .. }
            | ChatError::MessageTooLong { .. }
            | ChatError::LastMessageNotFromUser => {
                let body = ErrorResponse::new("INVALID_CONVERSATION", message);
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            ChatError::Upstream(err) => err,
        };

        tracing::warn!(error = %upstream, "Completion request failed");

        let (status, error_code) = match upstream {
            AIError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "AI_RATE_LIMITED"),
            AIError::AuthenticationFailed => (StatusCode::BAD_GATEWAY, "AI_AUTH_FAILED"),
            AIError::ContentFiltered { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "AI_CONTENT_FILTERED"),
            AIError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "AI_TIMEOUT"),
            AIError::Unavailable { .. }
            | AIError::Network(_)
            | AIError::Parse(_)
            | AIError::InvalidRequest(_) => (StatusCode::BAD_GATEWAY, "AI_UPSTREAM_ERROR"),
        };

        let body = ErrorResponse::new(error_code, message);
        match upstream {
            AIError::RateLimited { retry_after_secs } => (
                status,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                Json(body),
            )
                .into_response(),
            _ => (status, Json(body)).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ChatError) -> StatusCode {
        ChatApiError::from(err).into_response().status()
    }

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(status_of(ChatError::EmptyConversation), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ChatError::LastMessageNotFromUser), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(ChatError::MessageTooLong { index: 0, max: 4000 }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn provider_auth_failure_maps_to_502() {
        assert_eq!(
            status_of(AIError::AuthenticationFailed.into()),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn rate_limit_maps_to_429_with_retry_after() {
        let response = ChatApiError::from(ChatError::from(AIError::rate_limited(12))).into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "12");
    }

    #[test]
    fn provider_outage_maps_to_502() {
        assert_eq!(
            status_of(AIError::unavailable("server error 503").into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_of(AIError::network("reset").into()), StatusCode::BAD_GATEWAY);
    }
}
