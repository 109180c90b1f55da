pub mod autopay;
pub mod error;
pub mod traits;
pub mod types;

pub use error::Error;
pub use types::{AutoPayInput, ChargeRequest, PaymentId, PaymentRecord, ProviderReceipt};
