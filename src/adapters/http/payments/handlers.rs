//! HTTP handlers for payment endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::dto::{InitializePaymentRequest, InitializePaymentResponse, VerifyPaymentResponse};
use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::AppState;
use crate::application::handlers::billing::{
    InitializePaymentCommand, PaymentRequestError, VerifyPaymentQuery,
};
use crate::domain::foundation::Kobo;
use crate::ports::PaymentError;

/// POST /api/payments/initialize - Start a hosted checkout
pub async fn initialize_payment(
    State(state): State<AppState>,
    Json(request): Json<InitializePaymentRequest>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let cmd = InitializePaymentCommand {
        email: request.email,
        amount: Kobo::new(request.amount_kobo),
        plan: request.plan,
        metadata: request.metadata,
        reference: request.reference,
    };

    let result = state.initialize_payment.handle(cmd).await?;

    Ok(Json(InitializePaymentResponse::from(result)))
}

/// GET /api/payments/verify/:reference - Look up a transaction
pub async fn verify_payment(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let query = VerifyPaymentQuery { reference };

    let result = state.verify_payment.handle(query).await?;

    Ok(Json(VerifyPaymentResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts payment errors to HTTP responses.
#[derive(Debug)]
pub struct PaymentApiError(PaymentRequestError);

impl From<PaymentRequestError> for PaymentApiError {
    fn from(err: PaymentRequestError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> axum::response::Response {
        let message = self.0.to_string();
        let (status, body) = match &self.0 {
            PaymentRequestError::InvalidEmail(_) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new("INVALID_EMAIL", message))
            }
            PaymentRequestError::InvalidAmount => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new("INVALID_AMOUNT", message))
            }
            PaymentRequestError::InvalidReference(_) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new("INVALID_REFERENCE", message))
            }
            PaymentRequestError::Upstream(err) => {
                tracing::warn!(
                    code = %err.code,
                    upstream_status = ?err.upstream_status,
                    error = %err.message,
                    "Payment provider request failed"
                );
                (upstream_status(err), upstream_body(err))
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Reflects the provider's 4xx/5xx status; anything else is a bad gateway.
fn upstream_status(err: &PaymentError) -> StatusCode {
    err.upstream_status
        .filter(|status| (400..=599).contains(status))
        .and_then(|status| StatusCode::from_u16(status).ok())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

fn upstream_body(err: &PaymentError) -> ErrorResponse {
    ErrorResponse::new("UPSTREAM_ERROR", err.message.clone()).with_details(serde_json::json!({
        "provider": "paystack",
        "code": err.code,
        "upstream_status": err.upstream_status,
        "retryable": err.retryable,
    }))
}
