use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// URI of the payment dashboard UI resource.
pub const DASHBOARD_RESOURCE_URI: &str = "ui://x402/payment-dashboard";

/// Definition of an MCP tool exposed to the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    #[serde(rename = "outputSchema", skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Result payload of a `tools/call`: a text rendering plus the structured value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "structuredContent")]
    pub structured_content: Value,
}

/// A single content block of a tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl ToolResult {
    /// Result whose text block is the JSON serialization of `structured`.
    #[must_use]
    pub fn json(structured: Value) -> Self {
        let text = serde_json::to_string(&structured).unwrap_or_default();
        Self::with_text(text, structured)
    }

    /// Result with a custom human-readable text block.
    #[must_use]
    pub fn with_text(text: impl Into<String>, structured: Value) -> Self {
        Self {
            content: vec![ToolContent {
                kind: "text".to_string(),
                text: text.into(),
            }],
            structured_content: structured,
        }
    }
}

/// Registry of all MCP tools served by the auto-pay app.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Return the list of tool definitions for the MCP `tools/list` method.
    #[must_use]
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: "open_x402_dashboard".to_string(),
                title: "Open x402 Payment Dashboard".to_string(),
                description: "Open the dashboard showing x402 server status and weather.".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "sessionId": {
                            "type": "string",
                            "description": "Existing dashboard session to reopen"
                        }
                    },
                    "required": []
                }),
                output_schema: Some(json!({
                    "type": "object",
                    "properties": { "sessionId": { "type": "string" } },
                    "required": ["sessionId"]
                })),
                meta: Some(json!({
                    "ui": {
                        "resourceUri": DASHBOARD_RESOURCE_URI,
                        "csp": {
                            "default-src": ["'self'"],
                            "script-src": ["'self'", "https://esm.sh"],
                            "style-src": ["'self'", "'unsafe-inline'"]
                        }
                    }
                })),
            },
            ToolDefinition {
                name: "x402_get_health".to_string(),
                title: "x402 Get Health".to_string(),
                description: "Fetch the health check of the x402 resource server.".to_string(),
                input_schema: empty_input(),
                output_schema: Some(downstream_output()),
                meta: None,
            },
            ToolDefinition {
                name: "x402_get_weather".to_string(),
                title: "x402 Get Weather".to_string(),
                description: "Fetch the weather report from the x402 resource server.".to_string(),
                input_schema: empty_input(),
                output_schema: Some(downstream_output()),
                meta: None,
            },
            ToolDefinition {
                name: "auto_pay".to_string(),
                title: "Auto Pay".to_string(),
                description: "Charge a payment through the configured provider and record it. Every call creates a new payment.".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "amountCents": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Amount in minor currency units (e.g., 1250 for $12.50)"
                        },
                        "currency": {
                            "type": "string",
                            "minLength": 3,
                            "maxLength": 3,
                            "description": "ISO 4217 currency code"
                        },
                        "description": {
                            "type": "string",
                            "minLength": 1,
                            "description": "What the payment is for"
                        },
                        "customerId": {
                            "type": "string",
                            "description": "Optional customer reference passed to the provider"
                        }
                    },
                    "required": ["amountCents", "currency", "description"]
                }),
                output_schema: Some(json!({
                    "type": "object",
                    "properties": { "payment": payment_schema() },
                    "required": ["payment"]
                })),
                meta: None,
            },
            ToolDefinition {
                name: "list_payments".to_string(),
                title: "List Payments".to_string(),
                description: "List every recorded payment, most recent first.".to_string(),
                input_schema: empty_input(),
                output_schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "payments": { "type": "array", "items": payment_schema() }
                    },
                    "required": ["payments"]
                })),
                meta: None,
            },
            ToolDefinition {
                name: "get_payment".to_string(),
                title: "Get Payment".to_string(),
                description: "Look up a recorded payment by id. Returns null when it does not exist.".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "paymentId": {
                            "type": "string",
                            "description": "The payment id returned by auto_pay"
                        }
                    },
                    "required": ["paymentId"]
                }),
                output_schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "payment": { "anyOf": [payment_schema(), { "type": "null" }] }
                    },
                    "required": ["payment"]
                })),
                meta: None,
            },
        ]
    }
}

fn empty_input() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

fn downstream_output() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ok": { "type": "boolean" },
            "statusCode": { "type": "number" },
            "body": {}
        },
        "required": ["ok", "statusCode", "body"]
    })
}

fn payment_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string" },
            "amountCents": { "type": "integer" },
            "currency": { "type": "string" },
            "description": { "type": "string" },
            "status": { "type": "string" },
            "createdAtIso": { "type": "string" },
            "provider": { "type": "string" },
            "externalId": { "type": "string" }
        },
        "required": ["id", "amountCents", "currency", "description", "status", "createdAtIso", "provider"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tools_defined() {
        let tools = ToolRegistry::definitions();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();

        assert!(names.contains(&"open_x402_dashboard"));
        assert!(names.contains(&"x402_get_health"));
        assert!(names.contains(&"x402_get_weather"));
        assert!(names.contains(&"auto_pay"));
        assert!(names.contains(&"list_payments"));
        assert!(names.contains(&"get_payment"));
        assert_eq!(tools.len(), 6);
    }

    #[test]
    fn tools_serialize() {
        let tools = ToolRegistry::definitions();
        let json = serde_json::to_string(&tools).unwrap();
        assert!(json.contains("auto_pay"));
        assert!(json.contains("inputSchema"));
        assert!(json.contains("outputSchema"));
    }

    #[test]
    fn auto_pay_has_required_params() {
        let tools = ToolRegistry::definitions();
        let auto_pay = tools.iter().find(|t| t.name == "auto_pay").unwrap();
        let required = auto_pay.input_schema["required"].as_array().unwrap();

        let required_names: Vec<&str> = required.iter().filter_map(Value::as_str).collect();
        assert_eq!(required_names, ["amountCents", "currency", "description"]);
    }

    #[test]
    fn dashboard_points_at_ui_resource() {
        let tools = ToolRegistry::definitions();
        let dashboard = tools.iter().find(|t| t.name == "open_x402_dashboard").unwrap();
        let meta = dashboard.meta.as_ref().unwrap();
        assert_eq!(meta["ui"]["resourceUri"], DASHBOARD_RESOURCE_URI);

        let json = serde_json::to_value(dashboard).unwrap();
        assert!(json.get("_meta").is_some());
    }

    #[test]
    fn json_result_mirrors_structured_content() {
        let result = ToolResult::json(json!({ "payment": null }));
        assert_eq!(result.content.len(), 1);
        assert_eq!(result.content[0].kind, "text");
        assert_eq!(result.content[0].text, r#"{"payment":null}"#);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["structuredContent"]["payment"], Value::Null);
    }
}
