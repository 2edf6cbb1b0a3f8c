use crate::{
    AppState,
    auth::Principal,
    error::EnrollmentError,
    models::{ApiResponse, Enrollment, EnrollmentRequest, NewEnrollment, StudentEnrollments},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

/// course_id_from
///
/// Reduces the request body to its optional `courseId`. A missing or
/// unparsable body counts as "no courseId" so the service can still authorize
/// first and then answer with its own validation message.
fn course_id_from(payload: Result<Json<EnrollmentRequest>, JsonRejection>) -> Option<String> {
    match payload {
        Ok(Json(request)) => request.course_id,
        Err(rejection) => {
            tracing::debug!(%rejection, "enrollment request body ignored");
            None
        }
    }
}

// --- Handlers ---

/// list_enrollments
///
/// [Admin Route] Every enrollment in the store.
#[utoipa::path(
    get,
    path = "/api/v2/enrollments",
    tag = "enrollments",
    responses(
        (status = 200, description = "All enrollments, wrapped in the response envelope", body = [Enrollment]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn list_enrollments(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Enrollment>>>, EnrollmentError> {
    let all = state.enrollments.list_all(&principal).await?;
    Ok(Json(ApiResponse::data(all)))
}

/// reset_enrollments
///
/// [Admin Route] Empties the enrollment store.
#[utoipa::path(
    post,
    path = "/api/v2/enrollments/reset",
    tag = "enrollments",
    responses(
        (status = 200, description = "Store emptied"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn reset_enrollments(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<()>>, EnrollmentError> {
    state.enrollments.reset(&principal).await?;
    Ok(Json(ApiResponse::message("Enrollments database has been reset")))
}

/// get_student_enrollments
///
/// [Authenticated Route] One student's courses joined with their profile.
/// Administrators may read any student; students only themselves.
#[utoipa::path(
    get,
    path = "/api/v2/enrollments/{student_id}",
    tag = "enrollments",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student Information", body = StudentEnrollments),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Another student's record"),
        (status = 404, description = "No enrollments found")
    )
)]
pub async fn get_student_enrollments(
    principal: Principal,
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<ApiResponse<StudentEnrollments>>, EnrollmentError> {
    let view = state
        .enrollments
        .get_by_student(&principal, &student_id)
        .await?;
    Ok(Json(ApiResponse::with_message("Student Information", view)))
}

/// add_enrollment
///
/// [Authenticated Route] Enrolls the calling student in a course.
#[utoipa::path(
    post,
    path = "/api/v2/enrollments/{student_id}",
    tag = "enrollments",
    params(("student_id" = String, Path, description = "Student ID")),
    request_body = EnrollmentRequest,
    responses(
        (status = 200, description = "Enrollment added", body = NewEnrollment),
        (status = 400, description = "courseId missing or already enrolled"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not the calling student's record")
    )
)]
pub async fn add_enrollment(
    principal: Principal,
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    payload: Result<Json<EnrollmentRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<NewEnrollment>>, EnrollmentError> {
    let course_id = course_id_from(payload);
    let new_enroll = state
        .enrollments
        .add_enrollment(&principal, &student_id, course_id.as_deref())
        .await?;

    let message = format!(
        "Student {} && course {} has been added successfully",
        new_enroll.student_id, new_enroll.course_id
    );
    Ok(Json(ApiResponse::with_message(
        message,
        NewEnrollment { new_enroll },
    )))
}

/// delete_enrollment
///
/// [Authenticated Route] Drops one course for the calling student and returns
/// the courses they remain enrolled in.
#[utoipa::path(
    delete,
    path = "/api/v2/enrollments/{student_id}",
    tag = "enrollments",
    params(("student_id" = String, Path, description = "Student ID")),
    request_body = EnrollmentRequest,
    responses(
        (status = 200, description = "Remaining enrollments", body = [Enrollment]),
        (status = 400, description = "courseId missing"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not the calling student's record"),
        (status = 404, description = "Enrollment does not exist")
    )
)]
pub async fn delete_enrollment(
    principal: Principal,
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    payload: Result<Json<EnrollmentRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<Enrollment>>>, EnrollmentError> {
    let course_id = course_id_from(payload);
    let remaining = state
        .enrollments
        .delete_enrollment(&principal, &student_id, course_id.as_deref())
        .await?;

    let message = format!(
        "Student {} && course {} has been deleted successfully",
        student_id,
        course_id.unwrap_or_default()
    );
    Ok(Json(ApiResponse::with_message(message, remaining)))
}

// --- Fallbacks ---

/// route_not_found
///
/// Unknown paths get the failure envelope instead of an empty 404.
pub async fn route_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure("Route not found")),
    )
}

/// method_not_allowed
pub async fn method_not_allowed() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiResponse::failure("Method not allowed")),
    )
}
