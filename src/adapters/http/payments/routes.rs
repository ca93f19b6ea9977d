//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{initialize_payment, verify_payment};
use crate::adapters::http::AppState;

/// Create the payments API router.
///
/// # Routes
/// - `POST /initialize` - Start a hosted checkout
/// - `GET /verify/:reference` - Look up a transaction by reference
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/initialize", post(initialize_payment))
        .route("/verify/:reference", get(verify_payment))
}
