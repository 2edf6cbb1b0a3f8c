use crate::{auth::Principal, error::EnrollmentError};

const FORBIDDEN_ACCESS: &str = "Forbidden access";
const FORBIDDEN_MODIFY: &str = "You are not allowed to modify another student's data";

/// Action
///
/// An enrollment operation together with the student record it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    ListAll,
    Reset,
    View(&'a str),
    Enroll(&'a str),
    Drop(&'a str),
}

/// Whether `principal` may perform `action`.
///
/// Administrators read everything but never enroll or drop on a student's
/// behalf; students act only on their own record.
pub fn is_permitted(principal: &Principal, action: Action<'_>) -> bool {
    match (principal, action) {
        (Principal::Admin, Action::ListAll | Action::Reset | Action::View(_)) => true,
        (Principal::Admin, Action::Enroll(_) | Action::Drop(_)) => false,
        (Principal::Student { .. }, Action::ListAll | Action::Reset) => false,
        (
            Principal::Student { student_id },
            Action::View(target) | Action::Enroll(target) | Action::Drop(target),
        ) => student_id == target,
    }
}

/// Like [`is_permitted`], but yields the `Forbidden` error the HTTP layer reports.
pub fn authorize(principal: &Principal, action: Action<'_>) -> Result<(), EnrollmentError> {
    if is_permitted(principal, action) {
        return Ok(());
    }

    tracing::debug!(role = ?principal.role(), ?action, "authorization denied");
    let message = match action {
        Action::Drop(_) => FORBIDDEN_MODIFY,
        _ => FORBIDDEN_ACCESS,
    };
    Err(EnrollmentError::Forbidden(message.to_string()))
}
