use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::app_state::AppState;

pub const SERVICE_NAME: &str = "x402-weather-server";

/// Service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
    }))
}

/// Liveness plus which paywall settings are missing.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "missing": state.missing,
    }))
}

/// The paid resource.
pub async fn weather() -> Json<Value> {
    Json(json!({
        "report": {
            "weather": "sunny",
            "temperature": 70,
        }
    }))
}
