//! HTTP adapter for the payment pass-through.
//!
//! - `POST /api/payments/initialize` - Start a hosted checkout
//! - `GET /api/payments/verify/:reference` - Look up a transaction

pub mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::{initialize_payment, verify_payment, PaymentApiError};
pub use routes::payment_routes;
