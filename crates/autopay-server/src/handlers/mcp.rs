use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use autopay_core::types::{AutoPayInput, PaymentId};
use autopay_core::{autopay, Error};
use autopay_mcp::jsonrpc::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND};
use autopay_mcp::{JsonRpcRequest, JsonRpcResponse, ToolRegistry, ToolResult};

use crate::app_state::AppState;

pub const SERVER_NAME: &str = "x402-auto-pay-app";
const PROTOCOL_VERSION: &str = "2025-06-18";

/// Handle MCP JSON-RPC requests over Streamable HTTP.
///
/// Requests with an id get their response in the body. Id-less requests are
/// executed and answered with 202 and no body; `notifications/*` only get the 202.
/// Bodies that are not a JSON-RPC request are answered in-band with a null id.
pub async fn mcp_request(
    State(state): State<AppState>,
    body: Result<Json<JsonRpcRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return Json(rejection_response(&rejection)).into_response(),
    };

    if let Err(detail) = req.validate() {
        return Json(JsonRpcResponse::invalid_request(detail)).into_response();
    }

    if req.is_client_notification() {
        tracing::debug!("Received MCP notification: {}", req.method);
        return StatusCode::ACCEPTED.into_response();
    }

    let response = dispatch(&state, &req).await;

    if !req.expects_response() {
        tracing::debug!(
            method = %req.method,
            failed = response.error.is_some(),
            "Executed MCP request without id"
        );
        return StatusCode::ACCEPTED.into_response();
    }

    Json(response).into_response()
}

async fn dispatch(state: &AppState, req: &JsonRpcRequest) -> JsonRpcResponse {
    match req.method.as_str() {
        "initialize" => handle_initialize(req),
        "ping" => JsonRpcResponse::success(req.id.clone(), serde_json::json!({})),
        "tools/list" => handle_tools_list(req),
        "tools/call" => handle_tools_call(state, req).await,
        _ => JsonRpcResponse::error(req.id.clone(), METHOD_NOT_FOUND, "Method not found"),
    }
}

fn rejection_response(rejection: &JsonRejection) -> JsonRpcResponse {
    tracing::debug!(error = %rejection.body_text(), "Rejected MCP request body");
    match rejection {
        JsonRejection::JsonSyntaxError(_) => JsonRpcResponse::parse_error(rejection.body_text()),
        _ => JsonRpcResponse::invalid_request(rejection.body_text()),
    }
}

fn handle_initialize(req: &JsonRpcRequest) -> JsonRpcResponse {
    JsonRpcResponse::success(
        req.id.clone(),
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(req: &JsonRpcRequest) -> JsonRpcResponse {
    let tools = ToolRegistry::definitions();
    JsonRpcResponse::success(req.id.clone(), serde_json::json!({ "tools": tools }))
}

/// Why a tool call produced no result.
#[derive(Debug)]
enum ToolError {
    /// Arguments rejected before anything ran.
    InvalidParams(String),
    /// The tool ran and failed.
    Failed(String),
}

impl From<Error> for ToolError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(msg) => Self::InvalidParams(msg),
            other => Self::Failed(other.to_string()),
        }
    }
}

async fn handle_tools_call(state: &AppState, req: &JsonRpcRequest) -> JsonRpcResponse {
    let call = match req.tool_call() {
        Ok(call) => call,
        Err(msg) => return JsonRpcResponse::error(req.id.clone(), INVALID_PARAMS, msg),
    };
    let arguments = call.arguments();

    let result = match call.name.as_str() {
        "open_x402_dashboard" => Ok(tool_open_dashboard(&arguments)),
        "x402_get_health" => tool_x402_get_health(state).await,
        "x402_get_weather" => tool_x402_get_weather(state).await,
        "auto_pay" => tool_auto_pay(state, arguments).await,
        "list_payments" => tool_list_payments(state).await,
        "get_payment" => tool_get_payment(state, &arguments).await,
        other => Err(ToolError::InvalidParams(format!("Unknown tool: {other}"))),
    };

    match result {
        Ok(result) => JsonRpcResponse::success(
            req.id.clone(),
            serde_json::to_value(result).unwrap_or_default(),
        ),
        Err(ToolError::InvalidParams(msg)) => {
            JsonRpcResponse::error(req.id.clone(), INVALID_PARAMS, msg)
        }
        Err(ToolError::Failed(msg)) => {
            tracing::warn!(tool = %call.name, error = %msg, "Tool call failed");
            JsonRpcResponse::error(req.id.clone(), INTERNAL_ERROR, msg)
        }
    }
}

fn tool_open_dashboard(args: &Value) -> ToolResult {
    let session_id = args
        .get("sessionId")
        .and_then(Value::as_str)
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), ToString::to_string);

    ToolResult::with_text(
        "x402 dashboard opened",
        serde_json::json!({ "sessionId": session_id }),
    )
}

async fn tool_x402_get_health(state: &AppState) -> Result<ToolResult, ToolError> {
    let response = state.x402_server.get_health().await;
    downstream_result(&response)
}

async fn tool_x402_get_weather(state: &AppState) -> Result<ToolResult, ToolError> {
    let response = state.x402_server.get_weather().await;
    downstream_result(&response)
}

fn downstream_result(response: &crate::downstream::X402ServerResponse) -> Result<ToolResult, ToolError> {
    let value = serde_json::to_value(response).map_err(|e| ToolError::Failed(e.to_string()))?;
    Ok(ToolResult::json(value))
}

async fn tool_auto_pay(state: &AppState, args: Value) -> Result<ToolResult, ToolError> {
    let input: AutoPayInput = serde_json::from_value(args)
        .map_err(|e| ToolError::InvalidParams(format!("Invalid auto_pay arguments: {e}")))?;

    // Bad input is reported as such even when no provider is configured.
    input.clone().validate()?;

    let provider = state
        .provider
        .as_deref()
        .ok_or(Error::ProviderNotConfigured)?;

    let record = autopay::execute(state.store.as_ref(), provider, input).await?;

    Ok(ToolResult::json(serde_json::json!({ "payment": record })))
}

async fn tool_list_payments(state: &AppState) -> Result<ToolResult, ToolError> {
    let payments = state.store.list().await?;
    Ok(ToolResult::json(serde_json::json!({ "payments": payments })))
}

async fn tool_get_payment(state: &AppState, args: &Value) -> Result<ToolResult, ToolError> {
    let payment_id = args
        .get("paymentId")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidParams("Missing 'paymentId' parameter".to_string()))?;

    // A malformed id can never have been issued, so it is simply not found.
    let payment = match payment_id.parse::<PaymentId>() {
        Ok(id) => state.store.get(id).await?,
        Err(_) => None,
    };

    Ok(ToolResult::json(serde_json::json!({ "payment": payment })))
}
