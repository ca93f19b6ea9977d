//! Paystack API wire types.
//!
//! Every Paystack response is wrapped in `{ status, message, data }`. A
//! `status` of `false` is a failure even when the HTTP status is 200.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::Kobo;
use crate::ports::{TransactionInitialization, TransactionStatus, TransactionVerification};

/// Response envelope shared by all endpoints.
#[derive(Debug, Deserialize)]
pub struct PaystackEnvelope {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Body for `POST /transaction/initialize`.
#[derive(Debug, Serialize)]
pub struct InitializeBody<'a> {
    pub email: &'a str,
    pub amount: Kobo,
    pub reference: &'a str,
    pub callback_url: &'a str,
    pub currency: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a Value>,
}

/// `data` of a successful initialize call.
#[derive(Debug, Deserialize)]
pub struct PaystackInitialization {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

impl From<PaystackInitialization> for TransactionInitialization {
    fn from(data: PaystackInitialization) -> Self {
        Self {
            authorization_url: data.authorization_url,
            access_code: data.access_code,
            reference: data.reference,
        }
    }
}

/// `data` of a verify call.
#[derive(Debug, Deserialize)]
pub struct PaystackTransaction {
    pub reference: String,
    pub status: String,
    pub amount: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub gateway_response: Option<String>,
    #[serde(default)]
    pub customer: Option<PaystackCustomer>,
}

/// Customer object embedded in transactions.
#[derive(Debug, Deserialize)]
pub struct PaystackCustomer {
    #[serde(default)]
    pub email: Option<String>,
}

fn default_currency() -> String {
    "NGN".to_string()
}

impl From<PaystackTransaction> for TransactionVerification {
    fn from(data: PaystackTransaction) -> Self {
        Self {
            status: TransactionStatus::from_provider(&data.status),
            reference: data.reference,
            amount: Kobo::new(data.amount),
            currency: data.currency,
            customer_email: data.customer.and_then(|c| c.email),
            paid_at: data.paid_at,
            gateway_response: data.gateway_response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verify_response() {
        let json = r#"{
            "status": true,
            "message": "Verification successful",
            "data": {
                "id": 4099260516,
                "status": "success",
                "reference": "NGN-abc",
                "amount": 500000,
                "currency": "NGN",
                "paid_at": "2024-08-22T09:15:02.000Z",
                "gateway_response": "Approved",
                "customer": {"id": 181873746, "email": "ada@example.ng"}
            }
        }"#;

        let envelope: PaystackEnvelope = serde_json::from_str(json).unwrap();
        let data: PaystackTransaction = serde_json::from_value(envelope.data.unwrap()).unwrap();
        let verification = TransactionVerification::from(data);

        assert_eq!(verification.status, TransactionStatus::Success);
        assert_eq!(verification.amount, Kobo::new(500_000));
        assert_eq!(verification.customer_email.as_deref(), Some("ada@example.ng"));
        assert!(verification.paid_at.is_some());
    }

    #[test]
    fn abandoned_transaction_has_no_paid_at() {
        let json = r#"{"status":"abandoned","reference":"r1","amount":100,"paid_at":null}"#;

        let data: PaystackTransaction = serde_json::from_str(json).unwrap();
        let verification = TransactionVerification::from(data);

        assert_eq!(verification.status, TransactionStatus::Abandoned);
        assert_eq!(verification.currency, "NGN");
        assert!(verification.paid_at.is_none());
    }

    #[test]
    fn initialize_body_omits_absent_fields() {
        let body = InitializeBody {
            email: "ada@example.ng",
            amount: Kobo::new(500_000),
            reference: "NGN-1",
            callback_url: "https://app.example.ng/payment/callback",
            currency: "NGN",
            plan: None,
            metadata: None,
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["amount"], 500_000);
        assert!(json.get("plan").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn failure_envelope_without_data() {
        let envelope: PaystackEnvelope =
            serde_json::from_str(r#"{"status":false,"message":"Invalid key"}"#).unwrap();

        assert!(!envelope.status);
        assert_eq!(envelope.message, "Invalid key");
        assert!(envelope.data.is_none());
    }
}
