//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Public base URL must use HTTPS in production")]
    PublicUrlMustBeHttps,

    #[error("Invalid Paystack secret key format")]
    InvalidPaystackSecretKey,

    #[error("Invalid Paystack public key format")]
    InvalidPaystackPublicKey,

    #[error("Paystack test key used in production")]
    TestKeyInProduction,

    #[error("Invalid AI temperature: {0}")]
    InvalidTemperature(f32),

    #[error("Invalid AI max tokens")]
    InvalidMaxTokens,

    #[error("Invalid webhook handler timeout")]
    InvalidHandlerTimeout,

    #[error("Webhook dedup retention must exceed the handler timeout")]
    InvalidDedupRetention,

    #[error("Invalid webhook dedup sweep interval")]
    InvalidSweepInterval,

    #[error("Request timeout ({request_secs}s) must exceed webhook handler timeout ({handler_secs}s)")]
    RequestTimeoutTooShort { request_secs: u64, handler_secs: u64 },
}
