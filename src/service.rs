use crate::{
    access::{self, Action},
    auth::Principal,
    error::EnrollmentError,
    models::{Enrollment, StudentEnrollments},
    repository::{EnrollmentRepositoryState, StudentDirectoryState},
};

const COURSE_ID_REQUIRED: &str = "courseId is required";

/// EnrollmentService
///
/// Access-controlled operations over the enrollment store. Every operation
/// takes the request's `Principal` explicitly and authorizes before it reads
/// or validates anything else.
#[derive(Clone)]
pub struct EnrollmentService {
    enrollments: EnrollmentRepositoryState,
    students: StudentDirectoryState,
}

impl EnrollmentService {
    pub fn new(enrollments: EnrollmentRepositoryState, students: StudentDirectoryState) -> Self {
        Self {
            enrollments,
            students,
        }
    }

    /// list_all
    ///
    /// Admin only. Every enrollment in insertion order.
    pub async fn list_all(&self, principal: &Principal) -> Result<Vec<Enrollment>, EnrollmentError> {
        access::authorize(principal, Action::ListAll)?;
        let all = self.enrollments.all().await?;
        tracing::debug!(count = all.len(), "listed all enrollments");
        Ok(all)
    }

    /// reset
    ///
    /// Admin only. Empties the enrollment store; calling it again is a no-op.
    pub async fn reset(&self, principal: &Principal) -> Result<(), EnrollmentError> {
        access::authorize(principal, Action::Reset)?;
        let removed = self.enrollments.clear().await?;
        tracing::warn!(removed, role = ?principal.role(), "enrollment store reset");
        Ok(())
    }

    /// get_by_student
    ///
    /// Courses of one student joined with the directory profile. Directory
    /// fields that are missing come back as empty strings.
    pub async fn get_by_student(
        &self,
        principal: &Principal,
        student_id: &str,
    ) -> Result<StudentEnrollments, EnrollmentError> {
        access::authorize(principal, Action::View(student_id))?;

        let courses = self.enrollments.courses_for(student_id).await?;
        if courses.is_empty() {
            return Err(EnrollmentError::NotFound("No enrollments found".to_string()));
        }

        let profile = self.students.get_student(student_id).await?.unwrap_or_default();

        Ok(StudentEnrollments {
            student_id: student_id.to_string(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            program: profile.program,
            courses,
        })
    }

    /// add_enrollment
    ///
    /// Student only, on their own record. Order of checks: authorization,
    /// courseId presence, duplicate, then the append.
    pub async fn add_enrollment(
        &self,
        principal: &Principal,
        student_id: &str,
        course_id: Option<&str>,
    ) -> Result<Enrollment, EnrollmentError> {
        access::authorize(principal, Action::Enroll(student_id))?;
        let course_id = require_course_id(course_id)?;

        let enrollment = Enrollment::new(student_id, course_id);
        if !self.enrollments.insert(enrollment.clone()).await? {
            return Err(EnrollmentError::Conflict(format!(
                "Student {student_id} and course {course_id} is already exists"
            )));
        }

        tracing::info!(%student_id, %course_id, "enrollment added");
        Ok(enrollment)
    }

    /// delete_enrollment
    ///
    /// Student only, on their own record. Removes the single matching record
    /// and returns what the student is still enrolled in.
    pub async fn delete_enrollment(
        &self,
        principal: &Principal,
        student_id: &str,
        course_id: Option<&str>,
    ) -> Result<Vec<Enrollment>, EnrollmentError> {
        access::authorize(principal, Action::Drop(student_id))?;
        let course_id = require_course_id(course_id)?;

        let remaining = self
            .enrollments
            .remove(student_id, course_id)
            .await?
            .ok_or_else(|| EnrollmentError::NotFound("Enrollment does not exist".to_string()))?;

        tracing::info!(%student_id, %course_id, remaining = remaining.len(), "enrollment deleted");
        Ok(remaining)
    }
}

fn require_course_id(course_id: Option<&str>) -> Result<&str, EnrollmentError> {
    course_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| EnrollmentError::BadRequest(COURSE_ID_REQUIRED.to_string()))
}
