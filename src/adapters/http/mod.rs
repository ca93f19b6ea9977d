//! HTTP adapters - REST API implementations.
//!
//! Each feature has its own routes, handlers and DTOs; `app_router` nests
//! them under `/api`.

pub mod chat;
pub mod dto;
pub mod health;
pub mod payments;
mod router;
mod state;
pub mod webhooks;

pub use dto::ErrorResponse;
pub use router::app_router;
pub use state::AppState;
