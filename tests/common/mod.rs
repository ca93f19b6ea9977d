//! Shared test infrastructure for HTTP integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha512;

use naira_saas::adapters::http::{app_router, AppState};
use naira_saas::adapters::webhooks::InMemoryProcessedWebhookStore;
use naira_saas::application::handlers::billing::{
    InitializePaymentHandler, ReceiveWebhookHandler, VerifyPaymentHandler, WebhookHandlerRegistry,
};
use naira_saas::application::handlers::chat::{ChatSettings, SendChatMessageHandler};
use naira_saas::config::ServerConfig;
use naira_saas::domain::billing::{PaystackWebhookVerifier, WebhookError, WebhookEvent};
use naira_saas::domain::foundation::Kobo;
use naira_saas::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason,
    InitializeTransactionRequest, PaymentError, PaymentProvider, ProviderInfo, TokenUsage,
    TransactionInitialization, TransactionStatus, TransactionVerification, WebhookEventHandler,
};
use naira_saas::server::with_middleware;

pub const SECRET: &str = "sk_test_integration_secret";
pub const PUBLIC_BASE_URL: &str = "https://app.example.ng";

// =============================================================================
// Signing
// =============================================================================

/// Hex HMAC-SHA512 of `body`, computed independently of the crate under test.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

// =============================================================================
// Webhook Handlers
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Succeed,
    Fail,
    Hang,
}

/// Handler that records the `data` of every event it sees.
pub struct RecordingHandler {
    name: &'static str,
    behavior: Behavior,
    calls: Mutex<Vec<Value>>,
}

impl RecordingHandler {
    pub fn new(name: &'static str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name,
            behavior,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookEventHandler for RecordingHandler {
    async fn handle(&self, event: &WebhookEvent) -> Result<(), WebhookError> {
        self.calls.lock().unwrap().push(event.data().clone());
        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(WebhookError::handler_failure(self.name, "downstream unavailable")),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            }
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

// =============================================================================
// Payment Provider
// =============================================================================

pub struct MockPaymentProvider {
    pub initialize_requests: Mutex<Vec<InitializeTransactionRequest>>,
    pub verify_requests: Mutex<Vec<String>>,
    error: Option<PaymentError>,
}

impl MockPaymentProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            initialize_requests: Mutex::new(Vec::new()),
            verify_requests: Mutex::new(Vec::new()),
            error: None,
        })
    }

    pub fn failing(error: PaymentError) -> Arc<Self> {
        Arc::new(Self {
            initialize_requests: Mutex::new(Vec::new()),
            verify_requests: Mutex::new(Vec::new()),
            error: Some(error),
        })
    }

    pub fn call_count(&self) -> usize {
        self.initialize_requests.lock().unwrap().len() + self.verify_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<TransactionInitialization, PaymentError> {
        let reference = request.reference.clone();
        self.initialize_requests.lock().unwrap().push(request);
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(TransactionInitialization {
            authorization_url: format!("https://checkout.paystack.com/{}", reference),
            access_code: "acc_123".to_string(),
            reference,
        })
    }

    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<TransactionVerification, PaymentError> {
        self.verify_requests.lock().unwrap().push(reference.to_string());
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(TransactionVerification {
            reference: reference.to_string(),
            status: TransactionStatus::Success,
            amount: Kobo::new(500_000),
            currency: "NGN".to_string(),
            customer_email: Some("ada@example.ng".to_string()),
            paid_at: None,
            gateway_response: Some("Approved".to_string()),
        })
    }
}

// =============================================================================
// AI Provider
// =============================================================================

pub struct MockAIProvider {
    pub requests: Mutex<Vec<CompletionRequest>>,
    rate_limited: bool,
}

impl MockAIProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            rate_limited: false,
        })
    }

    pub fn rate_limited() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            rate_limited: true,
        })
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.requests.lock().unwrap().push(request);
        if self.rate_limited {
            return Err(AIError::rate_limited(20));
        }
        Ok(CompletionResponse {
            content: "Our Pro plan is ₦15,000 a month.".to_string(),
            usage: TokenUsage::new(120, 12),
            model: "gpt-4o-mini".to_string(),
            finish_reason: FinishReason::Stop,
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "gpt-4o-mini")
    }
}

// =============================================================================
// App
// =============================================================================

pub struct TestApp {
    pub router: Router,
}

pub struct TestAppBuilder {
    registry: WebhookHandlerRegistry,
    payments: Arc<MockPaymentProvider>,
    ai: Arc<MockAIProvider>,
    handler_timeout: Duration,
    middleware: Option<ServerConfig>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            registry: WebhookHandlerRegistry::new(),
            payments: MockPaymentProvider::new(),
            ai: MockAIProvider::new(),
            handler_timeout: Duration::from_secs(5),
            middleware: None,
        }
    }

    pub fn registry(mut self, registry: WebhookHandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn payments(mut self, payments: Arc<MockPaymentProvider>) -> Self {
        self.payments = payments;
        self
    }

    pub fn ai(mut self, ai: Arc<MockAIProvider>) -> Self {
        self.ai = ai;
        self
    }

    pub fn handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    /// Wraps the router in the production trace, timeout and CORS layers.
    pub fn middleware(mut self, server: ServerConfig) -> Self {
        self.middleware = Some(server);
        self
    }

    pub fn build(self) -> TestApp {
        let state = AppState {
            receive_webhook: Arc::new(ReceiveWebhookHandler::new(
                Arc::new(PaystackWebhookVerifier::new(SECRET)),
                Arc::new(self.registry),
                Arc::new(InMemoryProcessedWebhookStore::new()),
                self.handler_timeout,
            )),
            initialize_payment: Arc::new(InitializePaymentHandler::new(
                self.payments.clone(),
                PUBLIC_BASE_URL,
            )),
            verify_payment: Arc::new(VerifyPaymentHandler::new(self.payments)),
            send_chat_message: Arc::new(SendChatMessageHandler::new(
                self.ai,
                ChatSettings {
                    max_tokens: 256,
                    temperature: 0.2,
                },
            )),
        };
        let router = app_router(state);
        let router = match &self.middleware {
            Some(server) => with_middleware(router, server).unwrap(),
            None => router,
        };
        TestApp { router }
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        use tower::ServiceExt;
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
