//! Validation and upstream errors for the payment pass-through.

use thiserror::Error;

use crate::ports::PaymentError;

/// Longest reference the provider accepts.
pub const MAX_REFERENCE_LEN: usize = 100;

/// Errors from initializing or verifying a payment.
#[derive(Debug, Clone, Error)]
pub enum PaymentRequestError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Amount must be greater than zero kobo")]
    InvalidAmount,

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Payment provider error: {0}")]
    Upstream(#[from] PaymentError),
}

/// Checks that an email has the `local@domain.tld` shape.
pub(crate) fn validate_email(email: &str) -> Result<(), PaymentRequestError> {
    let invalid = || PaymentRequestError::InvalidEmail(email.to_string());

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Checks a transaction reference: 1-100 of `[A-Za-z0-9._=-]`.
pub(crate) fn validate_reference(reference: &str) -> Result<(), PaymentRequestError> {
    if reference.is_empty() {
        return Err(PaymentRequestError::InvalidReference(
            "reference is required".to_string(),
        ));
    }
    if reference.len() > MAX_REFERENCE_LEN {
        return Err(PaymentRequestError::InvalidReference(format!(
            "reference exceeds {} characters",
            MAX_REFERENCE_LEN
        )));
    }
    if !reference
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '='))
    {
        return Err(PaymentRequestError::InvalidReference(format!(
            "reference contains unsupported characters: {}",
            reference
        )));
    }
    Ok(())
}
