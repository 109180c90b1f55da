use axum::{
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::handlers;
use crate::paywall;

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let weather: MethodRouter<AppState> = match state.paywall.clone() {
        Some(x402) => get(handlers::weather).layer(x402),
        None => get(handlers::weather),
    };

    let paid = Router::new()
        .route("/weather", weather)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            paywall::require_payment,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(paid)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
