//! Paystack webhook signature verification.
//!
//! Paystack signs the raw request body with HMAC-SHA512 keyed by the
//! account's secret key and sends the lowercase hex digest in the
//! `x-paystack-signature` header.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use super::webhook_errors::WebhookError;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Request body whose signature has been checked.
///
/// Only [`PaystackWebhookVerifier::verify`] can produce one.
#[derive(Debug, Clone, Copy)]
pub struct VerifiedPayload<'a> {
    bytes: &'a [u8],
}

impl<'a> VerifiedPayload<'a> {
    /// The authenticated body bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// Verifier for Paystack webhook signatures.
pub struct PaystackWebhookVerifier {
    /// The Paystack secret key (also the webhook signing key).
    secret: Secret<String>,
}

impl PaystackWebhookVerifier {
    /// Creates a new verifier with the given secret key.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
        }
    }

    /// Verifies the signature over the exact payload bytes.
    ///
    /// # Errors
    ///
    /// - `MissingSignature` - header absent or blank
    /// - `InvalidSignature` - not hex, wrong length, or digest mismatch
    pub fn verify<'a>(
        &self,
        payload: &'a [u8],
        signature: Option<&str>,
    ) -> Result<VerifiedPayload<'a>, WebhookError> {
        let signature = signature
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(WebhookError::MissingSignature)?;

        let provided = hex::decode(signature).map_err(|_| WebhookError::InvalidSignature)?;
        let expected = self.compute_signature(payload);

        if !constant_time_compare(&expected, &provided) {
            return Err(WebhookError::InvalidSignature);
        }

        Ok(VerifiedPayload { bytes: payload })
    }

    /// Hex-encoded signature for a payload, as Paystack would send it.
    pub fn sign(&self, payload: &[u8]) -> String {
        hex::encode(self.compute_signature(payload))
    }

    fn compute_signature(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha512::new_from_slice(self.secret.expose_secret().as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
