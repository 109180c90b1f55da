use async_trait::async_trait;

use crate::error::Error;
use crate::types::{ChargeRequest, PaymentId, PaymentRecord, ProviderReceipt};

/// Store for payment records created by auto-pay calls.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Insert a record under its id. Fails if the id is already taken.
    async fn put(&self, record: PaymentRecord) -> Result<(), Error>;

    /// Get a record by id, `None` if it was never stored.
    async fn get(&self, id: PaymentId) -> Result<Option<PaymentRecord>, Error>;

    /// Snapshot of all records, most recent first.
    async fn list(&self) -> Result<Vec<PaymentRecord>, Error>;
}

/// External backend that actually moves the money.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Execute a charge and report its outcome.
    async fn charge(&self, charge: &ChargeRequest) -> Result<ProviderReceipt, Error>;
}
