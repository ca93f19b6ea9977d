//! Server bootstrap: logging, dependency wiring and the HTTP listener.

use std::sync::Arc;

use axum::Router;
use http::{header, HeaderValue, Method};
use thiserror::Error;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::adapters::ai::{OpenAIConfig, OpenAIProvider};
use crate::adapters::http::{app_router, AppState};
use crate::adapters::paystack::{PaystackConfig, PaystackPaymentAdapter};
use crate::adapters::webhooks::InMemoryProcessedWebhookStore;
use crate::application::handlers::billing::{
    InitializePaymentHandler, ReceiveWebhookHandler, VerifyPaymentHandler, WebhookClaimSweeper,
    WebhookHandlerRegistry,
};
use crate::application::handlers::chat::{ChatSettings, SendChatMessageHandler};
use crate::config::{AppConfig, ConfigError, ServerConfig, ValidationError};
use crate::domain::billing::{PaystackWebhookVerifier, SIGNATURE_HEADER};
use crate::ports::{AIError, PaymentError, ProcessedWebhookStore};

/// Errors that stop the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Logging initialization failed: {0}")]
    Logging(String),

    #[error("Payment client initialization failed: {0}")]
    Payment(#[from] PaymentError),

    #[error("AI client initialization failed: {0}")]
    Ai(#[from] AIError),

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `server.log_level`. Production logs are JSON.
pub fn init_tracing(server: &ServerConfig) -> Result<(), StartupError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if server.is_production() {
        subscriber
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .try_init()
            .map_err(|e| StartupError::Logging(e.to_string()))
    } else {
        subscriber
            .with(fmt::layer().with_target(true))
            .try_init()
            .map_err(|e| StartupError::Logging(e.to_string()))
    }
}

/// Builds adapters and handlers from configuration.
///
/// `store` is shared with the claim sweeper.
pub fn build_state(
    config: &AppConfig,
    store: Arc<dyn ProcessedWebhookStore>,
) -> Result<AppState, StartupError> {
    let payment_provider = Arc::new(PaystackPaymentAdapter::new(
        PaystackConfig::new(config.payment.paystack_secret_key.clone())
            .with_base_url(config.payment.paystack_base_url.clone())
            .with_timeout(config.payment.timeout()),
    )?);

    let ai_provider = Arc::new(OpenAIProvider::new(
        OpenAIConfig::new(config.ai.openai_api_key.clone())
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    )?);

    let verifier = Arc::new(PaystackWebhookVerifier::new(
        config.payment.paystack_secret_key.clone(),
    ));
    let registry = Arc::new(WebhookHandlerRegistry::with_default_handlers());

    tracing::info!(
        handlers = registry.len(),
        handler_timeout_secs = config.webhook.handler_timeout_secs,
        dedup_retention_secs = config.webhook.dedup_retention_secs,
        live_mode = config.payment.is_live_mode(),
        model = %config.ai.model,
        "Dependencies initialized"
    );

    Ok(AppState {
        receive_webhook: Arc::new(ReceiveWebhookHandler::new(
            verifier,
            registry,
            store,
            config.webhook.handler_timeout(),
        )),
        initialize_payment: Arc::new(InitializePaymentHandler::new(
            payment_provider.clone(),
            &config.server.public_base_url,
        )),
        verify_payment: Arc::new(VerifyPaymentHandler::new(payment_provider)),
        send_chat_message: Arc::new(SendChatMessageHandler::new(
            ai_provider,
            ChatSettings {
                max_tokens: config.ai.max_tokens,
                temperature: config.ai.temperature,
            },
        )),
    })
}

/// Wraps the application router in trace, timeout and CORS layers.
pub fn with_middleware(router: Router, server: &ServerConfig) -> Result<Router, StartupError> {
    Ok(router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(server.request_timeout()))
            .layer(cors_layer(server)?),
    ))
}

fn cors_layer(server: &ServerConfig) -> Result<CorsLayer, StartupError> {
    let origins = server.cors_origins_list();
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::HeaderName::from_static(SIGNATURE_HEADER),
        ]);

    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| StartupError::InvalidCorsOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// Loads configuration, wires dependencies and serves until shutdown.
pub async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server)?;
    config.validate()?;

    let addr = config.server.socket_addr()?;
    let store: Arc<dyn ProcessedWebhookStore> = Arc::new(InMemoryProcessedWebhookStore::new());
    let state = build_state(&config, store.clone())?;
    let app = with_middleware(app_router(state), &config.server)?;

    let (sweeper_shutdown, sweeper_rx) = watch::channel(false);
    let sweeper = WebhookClaimSweeper::new(
        store,
        config.webhook.dedup_retention(),
        config.webhook.dedup_sweep_interval(),
    );
    let sweeper_task = tokio::spawn(async move { sweeper.run(sweeper_rx).await });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "Server listening"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    let _ = sweeper_shutdown.send(true);
    if let Err(e) = sweeper_task.await {
        tracing::warn!(error = %e, "Webhook claim sweeper did not stop cleanly");
    }
    served?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for SIGTERM or Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
