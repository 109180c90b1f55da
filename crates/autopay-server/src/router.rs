use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::handlers;

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // MCP endpoint (Streamable HTTP: one JSON-RPC request per POST)
        .route("/mcp", post(handlers::mcp_request))
        .layer(TraceLayer::new_for_http())
        // CORS: allow any origin (MCP clients and the dashboard run in various contexts)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
