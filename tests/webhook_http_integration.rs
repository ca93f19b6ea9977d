//! Integration tests for the Paystack webhook endpoint.
//!
//! Drives the full router with signed and unsigned deliveries and checks
//! both the HTTP acknowledgement and which handlers ran.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use common::{body_json, sign, Behavior, RecordingHandler, TestApp, TestAppBuilder, SECRET};
use naira_saas::application::handlers::billing::WebhookHandlerRegistry;
use naira_saas::config::ServerConfig;
use naira_saas::domain::billing::WebhookEventType;

const WEBHOOK_URI: &str = "/api/webhooks/paystack";

fn webhook_request(body: &[u8], signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(WEBHOOK_URI)
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("x-paystack-signature", signature);
    }
    builder.body(Body::from(body.to_vec())).unwrap()
}

fn signed(body: &[u8]) -> Request<Body> {
    webhook_request(body, Some(&sign(SECRET, body)))
}

struct Handlers {
    charge: Arc<RecordingHandler>,
    disable: Arc<RecordingHandler>,
    transfer: Arc<RecordingHandler>,
}

fn app_with(charge_behavior: Behavior, timeout: Duration) -> (TestApp, Handlers) {
    let handlers = Handlers {
        charge: RecordingHandler::new("charge_success", charge_behavior),
        disable: RecordingHandler::new("subscription_disable", Behavior::Succeed),
        transfer: RecordingHandler::new("transfer_success", Behavior::Succeed),
    };
    let registry = WebhookHandlerRegistry::new()
        .register(WebhookEventType::ChargeSuccess, handlers.charge.clone())
        .register(WebhookEventType::SubscriptionDisable, handlers.disable.clone())
        .register(WebhookEventType::TransferSuccess, handlers.transfer.clone());

    let app = TestAppBuilder::new()
        .registry(registry)
        .handler_timeout(timeout)
        .build();
    (app, handlers)
}

fn app() -> (TestApp, Handlers) {
    app_with(Behavior::Succeed, Duration::from_secs(5))
}

fn total_calls(handlers: &Handlers) -> usize {
    handlers.charge.count() + handlers.disable.count() + handlers.transfer.count()
}

const CHARGE_SUCCESS: &[u8] =
    br#"{"event":"charge.success","data":{"reference":"NGN-ref-1","amount":500000,"customer":{"email":"ada@example.ng"}}}"#;

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn missing_signature_is_rejected_with_400() {
    let (app, handlers) = app();

    let response = app.send(webhook_request(CHARGE_SUCCESS, None)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_code"], "MISSING_SIGNATURE");
    assert_eq!(total_calls(&handlers), 0);
}

#[tokio::test]
async fn signature_from_wrong_secret_is_rejected_with_401() {
    let (app, handlers) = app();
    let signature = sign("sk_test_someone_else", CHARGE_SUCCESS);

    let response = app
        .send(webhook_request(CHARGE_SUCCESS, Some(&signature)))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error_code"], "INVALID_SIGNATURE");
    assert_eq!(total_calls(&handlers), 0);
}

#[tokio::test]
async fn tampered_body_is_rejected_with_401() {
    let (app, handlers) = app();
    let signature = sign(SECRET, CHARGE_SUCCESS);
    let tampered = br#"{"event":"charge.success","data":{"reference":"NGN-ref-1","amount":1}}"#;

    let response = app.send(webhook_request(tampered, Some(&signature))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(total_calls(&handlers), 0);
}

// =============================================================================
// Dispatch
// =============================================================================

#[tokio::test]
async fn charge_success_runs_only_its_handler_once() {
    let (app, handlers) = app();

    let response = app.send(signed(CHARGE_SUCCESS)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "received": true }));
    assert_eq!(handlers.charge.count(), 1);
    assert_eq!(handlers.disable.count(), 0);
    assert_eq!(handlers.transfer.count(), 0);
    assert_eq!(handlers.charge.calls()[0]["amount"], 500000);
}

#[tokio::test]
async fn subscription_disable_passes_event_data_to_handler() {
    let (app, handlers) = app();
    let body = br#"{"event":"subscription.disable","data":{"subscription_code":"SUB_1","customer":{"email":"a@b.com"}}}"#;

    let response = app.send(signed(body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "received": true }));
    assert_eq!(handlers.disable.count(), 1);
    assert_eq!(
        handlers.disable.calls()[0],
        json!({ "subscription_code": "SUB_1", "customer": { "email": "a@b.com" } })
    );
    assert_eq!(handlers.charge.count(), 0);
}

#[tokio::test]
async fn unknown_event_is_acknowledged() {
    let (app, handlers) = app();
    let body = br#"{"event":"paymentrequest.pending","data":{"id":1}}"#;

    let response = app.send(signed(body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "received": true }));
    assert_eq!(total_calls(&handlers), 0);
}

#[tokio::test]
async fn known_event_without_registered_handler_is_acknowledged() {
    let (app, handlers) = app();
    let body = br#"{"event":"invoice.create","data":{"invoice_code":"INV_1"}}"#;

    let response = app.send(signed(body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(total_calls(&handlers), 0);
}

#[tokio::test]
async fn malformed_authenticated_body_is_acknowledged() {
    let (app, handlers) = app();

    let bodies: [&[u8]; 3] = [b"not json", br#"{"data":{}}"#, br#"{"event":"charge.success"}"#];
    for body in bodies {
        let response = app.send(signed(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "received": true }));
    }
    assert_eq!(total_calls(&handlers), 0);
}

// =============================================================================
// Handler Failures
// =============================================================================

#[tokio::test]
async fn failing_handler_is_still_acknowledged() {
    let (app, handlers) = app_with(Behavior::Fail, Duration::from_secs(5));

    let response = app.send(signed(CHARGE_SUCCESS)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "received": true }));
    assert_eq!(handlers.charge.count(), 1);
}

#[tokio::test]
async fn hanging_handler_is_cut_off_and_acknowledged() {
    let (app, handlers) = app_with(Behavior::Hang, Duration::from_millis(50));
    let started = Instant::now();

    let response = app.send(signed(CHARGE_SUCCESS)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(handlers.charge.count(), 1);
}

#[tokio::test]
async fn hanging_handler_is_acknowledged_through_middleware() {
    let charge = RecordingHandler::new("charge_success", Behavior::Hang);
    let registry =
        WebhookHandlerRegistry::new().register(WebhookEventType::ChargeSuccess, charge.clone());
    let server = ServerConfig {
        request_timeout_secs: 1,
        ..ServerConfig::default()
    };
    let app = TestAppBuilder::new()
        .registry(registry)
        .handler_timeout(Duration::from_millis(200))
        .middleware(server)
        .build();

    let response = app.send(signed(CHARGE_SUCCESS)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "received": true }));
    assert_eq!(charge.count(), 1);
}

#[tokio::test]
async fn middleware_still_rejects_unsigned_webhooks() {
    let app = TestAppBuilder::new()
        .middleware(ServerConfig::default())
        .build();

    let response = app.send(webhook_request(CHARGE_SUCCESS, None)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Idempotency
// =============================================================================

#[tokio::test]
async fn duplicate_delivery_runs_handler_once() {
    let (app, handlers) = app();

    let first = app.send(signed(CHARGE_SUCCESS)).await;
    let second = app.send(signed(CHARGE_SUCCESS)).await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await, json!({ "received": true }));
    assert_eq!(handlers.charge.count(), 1);
}

#[tokio::test]
async fn failed_delivery_can_be_retried() {
    let (app, handlers) = app_with(Behavior::Fail, Duration::from_secs(5));

    app.send(signed(CHARGE_SUCCESS)).await;
    app.send(signed(CHARGE_SUCCESS)).await;

    assert_eq!(handlers.charge.count(), 2);
}

#[tokio::test]
async fn different_references_are_not_duplicates() {
    let (app, handlers) = app();
    let other = br#"{"event":"charge.success","data":{"reference":"NGN-ref-2","amount":100}}"#;

    app.send(signed(CHARGE_SUCCESS)).await;
    app.send(signed(other)).await;

    assert_eq!(handlers.charge.count(), 2);
}
