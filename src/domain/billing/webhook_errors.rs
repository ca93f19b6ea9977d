//! Webhook error types for Paystack webhook handling.
//!
//! Only authentication failures change the status code returned to the
//! provider. Everything past signature verification is acknowledged with
//! 200 so the provider does not redeliver because of a downstream bug.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookError {
    /// Signature header was not sent (or was blank).
    #[error("Missing signature")]
    MissingSignature,

    /// Signature did not match the HMAC of the body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Authenticated body is not a `{ event, data }` envelope.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// A handler failed, timed out or panicked.
    #[error("Handler {handler} failed: {reason}")]
    HandlerFailure {
        handler: &'static str,
        reason: String,
    },

    /// Idempotency store operation failed.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl WebhookError {
    /// Creates a handler failure.
    pub fn handler_failure(handler: &'static str, reason: impl Into<String>) -> Self {
        Self::HandlerFailure {
            handler,
            reason: reason.into(),
        }
    }

    /// Returns true if this error rejects the request before dispatch.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::MissingSignature | WebhookError::InvalidSignature
        )
    }

    /// Maps the error to the HTTP status code sent to the provider.
    ///
    /// - 400/401: authentication failed, nothing was dispatched
    /// - 200: authenticated; failure is ours to log, not theirs to retry
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::MalformedPayload(_)
            | WebhookError::HandlerFailure { .. }
            | WebhookError::StorageError(_) => StatusCode::OK,
        }
    }

    /// Stable code for the error response body.
    pub fn error_code(&self) -> &'static str {
        match self {
            WebhookError::MissingSignature => "MISSING_SIGNATURE",
            WebhookError::InvalidSignature => "INVALID_SIGNATURE",
            WebhookError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            WebhookError::HandlerFailure { .. } => "HANDLER_FAILURE",
            WebhookError::StorageError(_) => "STORAGE_ERROR",
        }
    }
}
