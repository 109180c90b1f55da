use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Unique identifier for a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(pub Uuid);

impl PaymentId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Uuid>().map(Self)
    }
}

/// A payment created by a successful auto-pay call. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub amount_cents: u64,
    pub currency: String,
    pub description: String,
    pub status: String,
    pub created_at_iso: DateTime<Utc>,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl PaymentRecord {
    /// Build a fresh record from a validated charge and the provider's receipt.
    ///
    /// Assigns a new identifier and upper-cases the currency.
    #[must_use]
    pub fn from_receipt(charge: &ChargeRequest, receipt: ProviderReceipt, now: DateTime<Utc>) -> Self {
        Self {
            id: PaymentId::new(),
            amount_cents: charge.amount_cents,
            currency: charge.currency.to_uppercase(),
            description: charge.description.clone(),
            status: receipt.status,
            created_at_iso: now,
            provider: receipt.provider,
            external_id: receipt.external_id,
        }
    }
}

/// Raw `auto_pay` tool arguments, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoPayInput {
    pub amount_cents: i64,
    pub currency: String,
    pub description: String,
    #[serde(default)]
    pub customer_id: Option<String>,
}

impl AutoPayInput {
    /// Check the input and turn it into a charge for the payment provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the amount is not positive, the currency
    /// is not exactly three characters, or the description is empty.
    pub fn validate(self) -> Result<ChargeRequest, Error> {
        let amount_cents = u64::try_from(self.amount_cents)
            .ok()
            .filter(|amount| *amount > 0)
            .ok_or_else(|| Error::Validation("amountCents must be a positive integer".into()))?;

        if self.currency.chars().count() != 3 {
            return Err(Error::Validation(
                "currency must be exactly 3 characters".into(),
            ));
        }

        if self.description.is_empty() {
            return Err(Error::Validation("description must not be empty".into()));
        }

        Ok(ChargeRequest {
            amount_cents,
            currency: self.currency,
            description: self.description,
            customer_id: self.customer_id,
        })
    }
}

/// A validated charge, as sent to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub amount_cents: u64,
    pub currency: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

/// What the payment provider reports back for a completed charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderReceipt {
    pub status: String,
    pub provider: String,
    #[serde(default)]
    pub external_id: Option<String>,
}
