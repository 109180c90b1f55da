use chrono::Utc;

use crate::error::Error;
use crate::traits::{PaymentProvider, PaymentStore};
use crate::types::{AutoPayInput, PaymentRecord};

/// Validate an auto-pay request, charge it through the provider and record it.
///
/// A record is stored only after the provider reports success, so a failed
/// call leaves the store untouched. Identical inputs are never deduplicated.
///
/// # Errors
///
/// Returns [`Error::Validation`] for bad input, the provider's error if the
/// charge fails, or the store's error if the insert fails.
pub async fn execute(
    store: &dyn PaymentStore,
    provider: &dyn PaymentProvider,
    input: AutoPayInput,
) -> Result<PaymentRecord, Error> {
    let charge = input.validate()?;

    let receipt = provider.charge(&charge).await?;
    let record = PaymentRecord::from_receipt(&charge, receipt, Utc::now());

    store.put(record.clone()).await?;

    tracing::info!(
        payment_id = %record.id,
        amount_cents = record.amount_cents,
        currency = %record.currency,
        provider = %record.provider,
        "Auto-pay recorded"
    );

    Ok(record)
}
