//! Validation rules as a form sees them.

use roster_core::{validate_course, validate_enrollment, validate_student};
use roster_types::{
    CourseDraft, CourseField, EnrollmentDraft, FormField, StudentDraft, StudentField,
};

use crate::common::{ana_draft, date, math_draft, store_on};

#[test]
fn empty_email_is_the_only_error_when_others_are_filled() {
    let draft = StudentDraft {
        email: String::new(),
        ..ana_draft()
    };
    let errors = validate_student(&draft).expect_err("email missing");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(StudentField::Email), Some("Email is required"));
}

#[test]
fn email_without_tld_is_invalid() {
    let draft = StudentDraft {
        email: "a@b".into(),
        ..ana_draft()
    };
    let errors = validate_student(&draft).expect_err("no tld");
    assert_eq!(errors.get(StudentField::Email), Some("Invalid email"));
}

#[test]
fn complete_student_has_no_errors() {
    let draft = StudentDraft {
        email: "a@b.com".into(),
        ..ana_draft()
    };
    assert!(validate_student(&draft).is_ok());
}

#[test]
fn blank_student_reports_every_field_in_form_order() {
    let errors = validate_student(&StudentDraft::default()).expect_err("blank");
    let fields: Vec<StudentField> = errors.fields().collect();
    assert_eq!(fields, StudentField::ALL);
}

#[test]
fn course_duration_accepts_zero_and_negative() {
    for raw in ["0", "-4", " 12 "] {
        let draft = CourseDraft {
            duration_hours: raw.into(),
            ..math_draft()
        };
        assert!(validate_course(&draft).is_ok(), "{raw:?} should be accepted");
    }

    let draft = CourseDraft {
        duration_hours: "1.5".into(),
        ..math_draft()
    };
    let errors = validate_course(&draft).expect_err("fractional");
    assert!(errors.contains(CourseField::DurationHours));
}

#[test]
fn enrollment_needs_both_selections() {
    let (store, _) = store_on(date(2024, 1, 1));
    let errors = validate_enrollment(&EnrollmentDraft::default(), &store).expect_err("empty");
    assert_eq!(errors.len(), 2);
}
