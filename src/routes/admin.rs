use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Admin Router Module
///
/// Routes over the whole enrollment store. The ADMIN role check happens in the
/// service on every call, after the authentication layer has resolved the
/// principal.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /api/v2/enrollments
        // Lists every enrollment in insertion order.
        .route("/api/v2/enrollments", get(handlers::list_enrollments))
        // POST /api/v2/enrollments/reset
        // Destructive: empties the store. Audited with a warn-level log event.
        // The static segment takes precedence over `{student_id}`.
        .route("/api/v2/enrollments/reset", post(handlers::reset_enrollments))
}
