use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Routes that act on a single student's enrollments. Each handler receives
/// the verified `Principal` and hands it to the service, which decides:
/// - GET: administrators, or the student the record belongs to.
/// - POST/DELETE: only the student the record belongs to.
pub fn authenticated_routes() -> Router<AppState> {
    Router::new()
        // GET    /api/v2/enrollments/{student_id}  joined course list
        // POST   /api/v2/enrollments/{student_id}  body { courseId }
        // DELETE /api/v2/enrollments/{student_id}  body { courseId }
        .route(
            "/api/v2/enrollments/{student_id}",
            get(handlers::get_student_enrollments)
                .post(handlers::add_enrollment)
                .delete(handlers::delete_enrollment),
        )
}
