//! JSON-RPC 2.0 envelope for the MCP endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// A JSON-RPC 2.0 request or notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Null or absent when the caller wants no response.
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// `notifications/*` messages only report client state and are not dispatched.
    pub fn is_client_notification(&self) -> bool {
        self.method.starts_with("notifications/")
    }

    /// Whether the caller is waiting for a response body.
    ///
    /// An id-less request is still executed; only its result is dropped.
    pub fn expects_response(&self) -> bool {
        !self.id.is_null() && !self.is_client_notification()
    }

    /// Reject envelopes that are valid JSON but not JSON-RPC 2.0.
    ///
    /// # Errors
    ///
    /// Returns a message for an `INVALID_REQUEST` response when `jsonrpc` is not `"2.0"`.
    pub fn validate(&self) -> Result<(), String> {
        if self.jsonrpc == JSONRPC_VERSION {
            Ok(())
        } else {
            Err(format!("unsupported jsonrpc version {:?}", self.jsonrpc))
        }
    }

    /// Decode the `params` of a `tools/call` request.
    ///
    /// # Errors
    ///
    /// Returns a message suitable for an `INVALID_PARAMS` response.
    pub fn tool_call(&self) -> Result<ToolCall, String> {
        let params = self.params.clone().ok_or("Missing params")?;
        serde_json::from_value(params).map_err(|e| format!("Invalid tools/call params: {e}"))
    }
}

/// `params` of `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub name: String,
    /// Missing or null arguments are treated as an empty object.
    #[serde(default)]
    arguments: Option<Value>,
}

impl ToolCall {
    pub fn arguments(&self) -> Value {
        self.arguments
            .clone()
            .filter(|args| !args.is_null())
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// The body was not JSON. The id could not be read, so it is null.
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::error(Value::Null, PARSE_ERROR, "Parse error").with_data(detail)
    }

    /// The body was JSON but not a request object. The id is null.
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::error(Value::Null, INVALID_REQUEST, "Invalid Request").with_data(detail)
    }

    #[must_use]
    fn with_data(mut self, detail: impl Into<String>) -> Self {
        if let Some(error) = self.error.as_mut() {
            error.data = Some(Value::String(detail.into()));
        }
        self
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
