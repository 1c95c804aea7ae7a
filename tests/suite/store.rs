//! Store properties exercised through the public API.

use roster_core::validate_student;
use roster_types::{
    CoursePatch, EnrollmentPatch, EnrollmentStatus, NewCourse, NewEnrollment, StudentPatch,
};

use crate::common::{ana_draft, date, store_on};

fn course(name: &str) -> NewCourse {
    NewCourse {
        name: name.into(),
        description: "desc".into(),
        duration_hours: 3,
    }
}

#[test]
fn added_student_reads_back_with_submitted_fields() {
    let (mut store, _) = store_on(date(2024, 1, 1));
    let new = validate_student(&ana_draft()).expect("valid student");
    let id = store.add_student(new.clone());

    let student = store.student(id).expect("stored");
    assert_eq!(student.first_name, new.first_name);
    assert_eq!(student.last_name, new.last_name);
    assert_eq!(student.email, new.email);
    assert_eq!(student.phone, new.phone);
    assert_eq!(student.birth_date, new.birth_date);
    assert_eq!(student.profile_url, new.profile_url);
}

#[test]
fn course_delete_cascades_only_to_its_enrollments() {
    let (mut store, _) = store_on(date(2024, 1, 1));
    let ana = store.add_student(validate_student(&ana_draft()).expect("valid"));
    let math = store.add_course(course("Math"));
    let art = store.add_course(course("Art"));
    for course in [math, art, math] {
        store.add_enrollment(NewEnrollment {
            student: ana,
            course,
            status: EnrollmentStatus::Active,
        });
    }

    let removed = store.remove_course(math).expect("math existed");
    assert_eq!(removed.cascaded.len(), 2);
    assert!(removed.cascaded.iter().all(|e| e.course == math));
    assert_eq!(store.enrollments().len(), 1);
    assert_eq!(store.enrollments()[0].course, art);
    assert_eq!(store.students().len(), 1);
}

#[test]
fn partial_update_leaves_other_fields_identical() {
    let (mut store, _) = store_on(date(2024, 1, 1));
    let id = store.add_student(validate_student(&ana_draft()).expect("valid"));
    let before = store.student(id).cloned().expect("stored");

    let changed = store.update_student(
        id,
        StudentPatch {
            phone: Some("777".into()),
            ..StudentPatch::default()
        },
    );
    assert!(changed);

    let after = store.student(id).expect("still stored");
    assert_eq!(after.phone, "777");
    assert_eq!(after.first_name, before.first_name);
    assert_eq!(after.last_name, before.last_name);
    assert_eq!(after.email, before.email);
    assert_eq!(after.birth_date, before.birth_date);
    assert_eq!(after.profile_url, before.profile_url);
    assert_eq!(after.id(), before.id());
}

#[test]
fn registration_date_survives_later_updates() {
    let (mut store, clock) = store_on(date(2024, 5, 1));
    let ana = store.add_student(validate_student(&ana_draft()).expect("valid"));
    let math = store.add_course(course("Math"));
    let id = store.add_enrollment(NewEnrollment {
        student: ana,
        course: math,
        status: EnrollmentStatus::Active,
    });

    clock.set(date(2024, 5, 9));
    store.update_enrollment(
        id,
        EnrollmentPatch {
            status: Some(EnrollmentStatus::Inactive),
            ..EnrollmentPatch::default()
        },
    );

    let enrollment = store.enrollment(id).expect("stored");
    assert_eq!(enrollment.status, EnrollmentStatus::Inactive);
    assert_eq!(enrollment.registered_on(), date(2024, 5, 1));
}

#[test]
fn missing_ids_are_silent_noops() {
    let (mut store, _) = store_on(date(2024, 1, 1));
    let math = store.add_course(course("Math"));
    store.remove_course(math);

    assert!(!store.update_course(math, CoursePatch::default()));
    assert!(store.remove_course(math).is_none());
    assert!(store.courses().is_empty());

    let next = store.add_course(course("Art"));
    assert_ne!(next, math);
}
