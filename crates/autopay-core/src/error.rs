use crate::types::PaymentId;

/// Core error type for the auto-pay system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate payment identifier: {0}")]
    DuplicateIdentifier(PaymentId),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("payment provider is not configured")]
    ProviderNotConfigured,

    #[error("payment provider error: {0}")]
    Provider(String),
}
