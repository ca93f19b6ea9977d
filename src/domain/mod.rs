//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (kobo amounts)
//! - `billing` - Paystack webhook authentication and event parsing
//! - `chat` - Intent heuristics for the assistant

pub mod billing;
pub mod chat;
pub mod foundation;
