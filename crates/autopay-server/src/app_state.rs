use std::sync::Arc;

use autopay_core::traits::{PaymentProvider, PaymentStore};

use crate::downstream::X402ServerClient;

/// Shared application state with injected dependencies.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PaymentStore>,
    /// `None` when no provider is configured; `auto_pay` then fails per call.
    pub provider: Option<Arc<dyn PaymentProvider>>,
    pub x402_server: Arc<X402ServerClient>,
}
