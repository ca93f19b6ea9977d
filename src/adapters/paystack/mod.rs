//! Paystack payment provider adapter.

mod api_types;
mod paystack_adapter;

pub use paystack_adapter::{PaystackConfig, PaystackPaymentAdapter, DEFAULT_BASE_URL};
