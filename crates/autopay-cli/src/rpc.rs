use reqwest::Client;
use serde_json::{json, Value};

/// JSON-RPC client for the auto-pay tool server's `/mcp` endpoint.
pub struct McpClient {
    endpoint: String,
    client: Client,
}

impl McpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/mcp", base_url.trim_end_matches('/')),
            client: Client::new(),
        }
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> anyhow::Result<Value> {
        self.request(
            "tools/call",
            json!({
                "name": name,
                "arguments": arguments,
            }),
        )
        .await
    }

    pub async fn list_tools(&self) -> anyhow::Result<Value> {
        self.request("tools/list", json!({})).await
    }

    /// Issue one request and return its `result`, or fail with the server's `error`.
    async fn request(&self, method: &str, params: Value) -> anyhow::Result<Value> {
        tracing::debug!(endpoint = %self.endpoint, method, "Sending request");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request_body(method, params))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await?;
            anyhow::bail!("Server returned {status}: {body}");
        }

        let mut body: Value = resp.json().await?;
        if let Some(error) = body.get("error") {
            anyhow::bail!("{}", serde_json::to_string_pretty(error)?);
        }
        Ok(body
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }
}

fn request_body(method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    })
}
