//! Axum router configuration for webhook endpoints.

use axum::{routing::post, Router};

use super::handlers::receive_paystack_webhook;
use crate::adapters::http::AppState;

/// Create the webhook router.
///
/// Webhooks carry no user authentication; the body signature is checked
/// instead.
///
/// # Routes
/// - `POST /paystack` - Receive a Paystack event
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/paystack", post(receive_paystack_webhook))
}
