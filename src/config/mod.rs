//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `NAIRA_SAAS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use naira_saas::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod payment;
mod server;
mod webhook;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Every section has defaults so that missing secrets surface as
/// [`ValidationError::MissingRequired`] rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, public URL)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment configuration (Paystack)
    #[serde(default)]
    pub payment: PaymentConfig,

    /// AI provider configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Webhook dispatch configuration
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NAIRA_SAAS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `NAIRA_SAAS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NAIRA_SAAS__PAYMENT__PAYSTACK_SECRET_KEY=...` -> `payment.paystack_secret_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NAIRA_SAAS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - URL formats
    /// - Required API key prefixes
    /// - Production-specific requirements (HTTPS, live keys)
    /// - Request timeout longer than the webhook handler timeout
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        self.ai.validate()?;
        self.webhook.validate()?;

        // Webhook requests share the request timeout; it has to outlast
        // the handler so authenticated deliveries are never answered 408.
        if self.server.request_timeout_secs <= self.webhook.handler_timeout_secs {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                handler_secs: self.webhook.handler_timeout_secs,
            });
        }

        if self.is_production() && self.payment.is_test_mode() {
            return Err(ValidationError::TestKeyInProduction);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
