//! Timeout-bounded client for the x402 resource server.
//!
//! Every call resolves to an [`X402ServerResponse`]: transport failures and
//! timeouts are folded into an `ok: false` value instead of an error.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Error code reported when the resource server cannot be reached in time.
pub const UNREACHABLE_ERROR: &str = "X402_SERVER_UNREACHABLE";

/// Outcome of a request to the resource server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct X402ServerResponse {
    pub ok: bool,
    /// `0` when no response was received.
    pub status_code: u16,
    /// Parsed JSON body, `null` if the body was not JSON.
    pub body: Value,
}

impl X402ServerResponse {
    fn unreachable(detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            status_code: 0,
            body: json!({
                "error": UNREACHABLE_ERROR,
                "detail": detail.into(),
            }),
        }
    }
}

/// Client for the resource server's read-only endpoints. Never retries, never caches.
#[derive(Debug, Clone)]
pub struct X402ServerClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl X402ServerClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            client: Client::new(),
        }
    }

    /// Base URL with a single trailing slash trimmed, followed by `path`.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        format!("{base}{path}")
    }

    pub async fn get_health(&self) -> X402ServerResponse {
        self.request("/health").await
    }

    pub async fn get_weather(&self) -> X402ServerResponse {
        self.request("/weather").await
    }

    /// `GET` the given path, giving up after the configured timeout.
    pub async fn request(&self, path: &str) -> X402ServerResponse {
        let url = self.url_for(path);

        match tokio::time::timeout(self.timeout, self.fetch(&url)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                tracing::warn!(%url, error = %err, "x402 server request failed");
                X402ServerResponse::unreachable(err.to_string())
            }
            Err(_) => {
                tracing::warn!(%url, timeout_ms = self.timeout.as_millis(), "x402 server request timed out");
                X402ServerResponse::unreachable(format!(
                    "request timed out after {}ms",
                    self.timeout.as_millis()
                ))
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<X402ServerResponse, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        let body = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or(Value::Null),
            Err(_) => Value::Null,
        };

        Ok(X402ServerResponse {
            ok: status.is_success(),
            status_code: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_one_trailing_slash() {
        let client = X402ServerClient::new("http://localhost:4021/", Duration::from_secs(1));
        assert_eq!(client.url_for("/health"), "http://localhost:4021/health");

        let client = X402ServerClient::new("http://localhost:4021//", Duration::from_secs(1));
        assert_eq!(client.url_for("/health"), "http://localhost:4021//health");

        let client = X402ServerClient::new("http://localhost:4021", Duration::from_secs(1));
        assert_eq!(client.url_for("/weather"), "http://localhost:4021/weather");
    }

    #[test]
    fn unreachable_shape() {
        let response = X402ServerResponse::unreachable("connection refused");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["ok"], false);
        assert_eq!(json["statusCode"], 0);
        assert_eq!(json["body"]["error"], UNREACHABLE_ERROR);
        assert_eq!(json["body"]["detail"], "connection refused");
    }
}
