//! Naira SaaS - Backend for a Nigeria-focused SaaS product
//!
//! Receives signed Paystack webhooks and dispatches them to per-event
//! handlers, passes payment initialization and verification through to
//! Paystack, and fronts an OpenAI-compatible chat assistant.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
