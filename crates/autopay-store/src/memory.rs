use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use autopay_core::error::Error;
use autopay_core::traits::PaymentStore;
use autopay_core::types::{PaymentId, PaymentRecord};

/// Process-lifetime payment store. Nothing is evicted or persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Records in insertion order.
    records: Vec<PaymentRecord>,
    /// Payment id -> position in `records`.
    index: HashMap<PaymentId, usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn put(&self, record: PaymentRecord) -> Result<(), Error> {
        let mut inner = self.inner.write().await;
        if inner.index.contains_key(&record.id) {
            tracing::warn!(payment_id = %record.id, "Rejected duplicate payment id");
            return Err(Error::DuplicateIdentifier(record.id));
        }

        let position = inner.records.len();
        inner.index.insert(record.id, position);
        inner.records.push(record);
        Ok(())
    }

    async fn get(&self, id: PaymentId) -> Result<Option<PaymentRecord>, Error> {
        let inner = self.inner.read().await;
        Ok(inner
            .index
            .get(&id)
            .and_then(|&position| inner.records.get(position))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<PaymentRecord>, Error> {
        let mut snapshot: Vec<PaymentRecord> =
            self.inner.read().await.records.iter().rev().cloned().collect();

        // Stable sort: equal timestamps keep newest-inserted first.
        snapshot.sort_by(|a, b| b.created_at_iso.cmp(&a.created_at_iso));
        Ok(snapshot)
    }
}
