use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

// --- Core Records ---

/// Enrollment
///
/// A single fact linking one student to one course. Records are created and
/// removed whole; the service never edits one in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Enrollment {
    pub student_id: String,
    pub course_id: String,
}

impl Enrollment {
    pub fn new(student_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            course_id: course_id.into(),
        }
    }
}

/// Student
///
/// Profile record owned by the student directory. Read-only from the
/// enrollment service's point of view. Missing fields deserialize as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Student {
    pub student_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub program: String,
}

// --- Request Payloads ---

/// EnrollmentRequest
///
/// Body of `POST` and `DELETE /api/v2/enrollments/{studentId}`. The field is
/// optional at the wire level so the service can answer a missing value with
/// its own validation message instead of a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EnrollmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "CS101")]
    pub course_id: Option<String>,
}

// --- Response Payloads ---

/// StudentEnrollments
///
/// Enrollment view for one student joined with their directory profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StudentEnrollments {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub program: String,
    /// Course ids in the order they were enrolled.
    pub courses: Vec<String>,
}

/// NewEnrollment
///
/// `data` payload of a successful create: `{ "newEnroll": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NewEnrollment {
    #[serde(rename = "newEnroll")]
    pub new_enroll: Enrollment,
}

/// ApiResponse
///
/// The JSON envelope every endpoint answers with, success or failure.
/// Optional members are left out of the output when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// Failure carrying a diagnostic detail alongside the user-facing message.
    pub fn failure_with_error(message: impl Into<String>, error: impl Into<serde_json::Value>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: Some(error.into()),
        }
    }
}
