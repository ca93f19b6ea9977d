//! Top-level router wiring every feature router together.

use axum::{routing::get, Router};

use super::chat::chat_routes;
use super::health::health;
use super::payments::payment_routes;
use super::webhooks::webhook_routes;
use super::AppState;

/// Create the application router.
///
/// # Routes
/// - `GET /health`
/// - `POST /api/webhooks/paystack`
/// - `POST /api/payments/initialize`
/// - `GET /api/payments/verify/:reference`
/// - `POST /api/chat`
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/webhooks", webhook_routes())
        .nest("/api/payments", payment_routes())
        .nest("/api/chat", chat_routes())
        .with_state(state)
}
