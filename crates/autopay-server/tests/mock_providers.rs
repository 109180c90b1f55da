use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use autopay_core::error::Error;
use autopay_core::traits::PaymentProvider;
use autopay_core::types::{ChargeRequest, ProviderReceipt};

/// Provider that approves every charge and counts how often it was called.
#[derive(Default)]
pub struct ApprovingProvider {
    calls: AtomicUsize,
}

impl ApprovingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentProvider for ApprovingProvider {
    async fn charge(&self, _charge: &ChargeRequest) -> Result<ProviderReceipt, Error> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ProviderReceipt {
            status: "succeeded".to_string(),
            provider: "mock".to_string(),
            external_id: Some(format!("ext_{n}")),
        })
    }
}

/// Provider that declines every charge.
#[derive(Default)]
pub struct DecliningProvider;

#[async_trait]
impl PaymentProvider for DecliningProvider {
    async fn charge(&self, _charge: &ChargeRequest) -> Result<ProviderReceipt, Error> {
        Err(Error::Provider("card declined".to_string()))
    }
}
