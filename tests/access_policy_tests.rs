use enrollment_service::{
    EnrollmentError,
    access::{Action, authorize, is_permitted},
    auth::Principal,
};
use proptest::prelude::*;

#[test]
fn test_admin_permissions() {
    let admin = Principal::Admin;

    assert!(is_permitted(&admin, Action::ListAll));
    assert!(is_permitted(&admin, Action::Reset));
    assert!(is_permitted(&admin, Action::View("S1")));
    assert!(!is_permitted(&admin, Action::Enroll("S1")));
    assert!(!is_permitted(&admin, Action::Drop("S1")));
}

#[test]
fn test_student_permissions_on_own_record() {
    let student = Principal::student("S1");

    assert!(!is_permitted(&student, Action::ListAll));
    assert!(!is_permitted(&student, Action::Reset));
    assert!(is_permitted(&student, Action::View("S1")));
    assert!(is_permitted(&student, Action::Enroll("S1")));
    assert!(is_permitted(&student, Action::Drop("S1")));
}

#[test]
fn test_forbidden_messages() {
    let student = Principal::student("S1");

    assert_eq!(
        authorize(&student, Action::View("S2")),
        Err(EnrollmentError::Forbidden("Forbidden access".to_string()))
    );
    assert_eq!(
        authorize(&student, Action::Enroll("S2")),
        Err(EnrollmentError::Forbidden("Forbidden access".to_string()))
    );
    assert_eq!(
        authorize(&student, Action::Drop("S2")),
        Err(EnrollmentError::Forbidden(
            "You are not allowed to modify another student's data".to_string()
        ))
    );
    assert_eq!(authorize(&student, Action::Drop("S1")), Ok(()));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: a student can never act on a record that is not their own.
    #[test]
    fn student_never_reaches_another_students_record(
        own in "[A-Z0-9]{1,10}",
        other in "[A-Z0-9]{1,10}",
    ) {
        prop_assume!(own != other);
        let student = Principal::student(own);

        prop_assert!(!is_permitted(&student, Action::View(&other)));
        prop_assert!(!is_permitted(&student, Action::Enroll(&other)));
        prop_assert!(!is_permitted(&student, Action::Drop(&other)));
    }

    /// Property: a student always reaches their own record.
    #[test]
    fn student_always_reaches_own_record(own in "[A-Z0-9]{1,10}") {
        let student = Principal::student(own.clone());

        prop_assert!(is_permitted(&student, Action::View(&own)));
        prop_assert!(is_permitted(&student, Action::Enroll(&own)));
        prop_assert!(is_permitted(&student, Action::Drop(&own)));
    }
}
