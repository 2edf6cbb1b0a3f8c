use crate::AppState;
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints that need no token.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for load balancers and tests.
        .route("/health", get(|| async { "ok" }))
}
