//! HTTP handlers for webhook endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::AppState;
use crate::application::handlers::billing::ReceiveWebhookCommand;
use crate::domain::billing::{WebhookError, SIGNATURE_HEADER};

/// Body acknowledging an authenticated delivery.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// POST /api/webhooks/paystack - Receive a Paystack event
///
/// The body is taken as raw bytes because the signature covers the exact
/// bytes sent. Any authenticated delivery is acknowledged with 200, whatever
/// the dispatch outcome.
pub async fn receive_paystack_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    // Non-UTF-8 header bytes can never be a valid hex digest
    let signature = headers
        .get(SIGNATURE_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    let cmd = ReceiveWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    let outcome = state.receive_webhook.handle(cmd).await?;
    tracing::debug!(outcome = ?outcome, "Webhook acknowledged");

    Ok((StatusCode::OK, Json(WebhookAck { received: true })))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        // Past authentication the provider only ever sees an acknowledgement
        if !self.0.is_authentication_failure() {
            tracing::error!(error = %self.0, "Webhook failed after authentication");
            return (StatusCode::OK, Json(WebhookAck { received: true })).into_response();
        }

        let body = ErrorResponse::new(self.0.error_code(), self.0.to_string());
        (self.0.status_code(), Json(body)).into_response()
    }
}
