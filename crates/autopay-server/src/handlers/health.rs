use axum::Json;
use serde_json::Value;

use super::mcp::SERVER_NAME;

/// Liveness check, same shape as the banner.
pub async fn health() -> Json<Value> {
    status_ok()
}

/// Service banner.
pub async fn root() -> Json<Value> {
    status_ok()
}

fn status_ok() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVER_NAME,
    }))
}
