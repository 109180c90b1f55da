use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use autopay_core::error::Error;
use autopay_core::traits::PaymentProvider;
use autopay_core::types::{ChargeRequest, ProviderReceipt};

/// Payment provider reached over HTTP at `POST {base_url}/payments`.
#[derive(Debug, Clone)]
pub struct HttpPaymentProvider {
    payments_url: String,
    name: String,
    timeout: Duration,
    client: Client,
}

/// Provider reply. `provider` falls back to the configured name when omitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChargeResponse {
    status: String,
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    external_id: Option<String>,
}

impl HttpPaymentProvider {
    #[must_use]
    pub fn new(base_url: &str, name: impl Into<String>, timeout: Duration) -> Self {
        let base = base_url.strip_suffix('/').unwrap_or(base_url);
        Self {
            payments_url: format!("{base}/payments"),
            name: name.into(),
            timeout,
            client: Client::new(),
        }
    }

    pub fn payments_url(&self) -> &str {
        &self.payments_url
    }
}

#[async_trait]
impl PaymentProvider for HttpPaymentProvider {
    async fn charge(&self, charge: &ChargeRequest) -> Result<ProviderReceipt, Error> {
        let response = self
            .client
            .post(&self.payments_url)
            .json(charge)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("request to {} failed: {e}", self.payments_url)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!("unexpected status {status}: {body}")));
        }

        let reply: ChargeResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("invalid provider response: {e}")))?;

        Ok(ProviderReceipt {
            status: reply.status,
            provider: reply.provider.unwrap_or_else(|| self.name.clone()),
            external_id: reply.external_id,
        })
    }
}
