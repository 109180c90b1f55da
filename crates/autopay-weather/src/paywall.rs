//! Gate for paid routes while the x402 layer cannot be built.
//!
//! Payment itself (`402` challenge, facilitator verify and settle) is handled by
//! the `r402-http` layer installed in [`crate::router`].

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app_state::AppState;

/// Answers `503` with the missing settings until the paywall is configured.
pub async fn require_payment(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if state.paywall.is_some() {
        return next.run(req).await;
    }

    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "status": "error",
            "message": "x402 paywall is not configured: set EVM_ADDRESS and FACILITATOR_URL",
            "missing": state.missing,
        })),
    )
        .into_response()
}
