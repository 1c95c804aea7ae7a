//! End-to-end flows through the application controller.

use roster_core::{validate_course, validate_enrollment, validate_student};
use roster_engine::{EditTarget, InputMode, SubmitOutcome, Tab};
use roster_types::{EnrollmentDraft, EnrollmentStatus};

use crate::common::{ana_draft, app_on, date, math_draft, store_on};

#[test]
fn deleting_student_keeps_course_and_drops_enrollment() {
    let (mut store, _) = store_on(date(2024, 9, 2));
    let ana = store.add_student(validate_student(&ana_draft()).expect("valid student"));
    let math = store.add_course(validate_course(&math_draft()).expect("valid course"));
    let draft = EnrollmentDraft {
        student: Some(ana),
        course: Some(math),
        status: EnrollmentStatus::Active,
    };
    store.add_enrollment(validate_enrollment(&draft, &store).expect("valid enrollment"));
    assert_eq!(store.enrollments().len(), 1);

    let removed = store.remove_student(ana).expect("ana existed");
    assert_eq!(removed.cascaded.len(), 1);
    assert_eq!(store.courses().len(), 1);
    assert_eq!(store.courses()[0].name, "Math");
    assert!(store.enrollments().is_empty());
}

#[test]
fn enrollment_table_joins_names() {
    let (mut store, _) = store_on(date(2024, 9, 2));
    let ana = store.add_student(validate_student(&ana_draft()).expect("valid"));
    let math = store.add_course(validate_course(&math_draft()).expect("valid"));
    let draft = EnrollmentDraft {
        student: Some(ana),
        course: Some(math),
        status: EnrollmentStatus::Active,
    };
    let id = store.add_enrollment(validate_enrollment(&draft, &store).expect("valid"));

    let enrollment = store.enrollment(id).expect("stored");
    let names = store.enrollment_names(enrollment);
    assert_eq!(names.student.map(|s| s.full_name()), Some("Ana Diaz".into()));
    assert_eq!(names.course.map(|c| c.name.as_str()), Some("Math"));
}

#[test]
fn edit_then_add_switches_between_update_and_create() {
    let (mut app, _) = app_on(date(2024, 9, 2));
    app.select_tab(Tab::Courses);
    app.open_add();
    assert_eq!(app.form().map(|f| f.title()), Some("Add course".into()));
    app.cancel_form();

    let mut store_app = {
        let (mut store, _) = store_on(date(2024, 9, 2));
        store.add_course(validate_course(&math_draft()).expect("valid"));
        roster_engine::App::with_store(store)
    };
    store_app.select_tab(Tab::Courses);
    store_app.open_edit_selected();
    assert_eq!(store_app.input_mode(), InputMode::Form);
    let target = store_app.view().edit_target();
    assert!(matches!(target, Some(EditTarget::Course(_))));
    assert!(matches!(store_app.submit_form(), SubmitOutcome::Saved(_)));
    assert_eq!(store_app.store().courses().len(), 1);

    store_app.open_add();
    assert_eq!(store_app.view().edit_target(), None);
    assert!(matches!(
        store_app.submit_form(),
        SubmitOutcome::Rejected { errors: 3 }
    ));
    assert_eq!(store_app.store().courses().len(), 1);
}

#[test]
fn switching_tabs_never_touches_data_or_modal() {
    let (mut app, _) = app_on(date(2024, 9, 2));
    app.open_add();
    app.select_tab(Tab::Enrollments);
    assert!(app.view().is_modal_open());
    assert_eq!(app.form().map(|f| f.kind()), Some(Tab::Students));
    app.cancel_form();
    assert!(!app.view().is_modal_open());
}
