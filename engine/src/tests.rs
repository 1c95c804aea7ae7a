use chrono::NaiveDate;
use roster_core::{EntityStore, ManualClock};
use roster_types::ui::{EditTarget, Tab, UiOptions};
use roster_types::{EnrollmentStatus, FormField, StudentField};

use crate::{App, InputMode, StatusKind, SubmitOutcome};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn app() -> (App, ManualClock) {
    let clock = ManualClock::new(date(2024, 3, 1));
    let app = App::with_store(EntityStore::with_clock(clock.clone()));
    (app, clock)
}

fn type_text(app: &mut App, text: &str) {
    let token = app.form_token().expect("form open");
    app.form_mode(token).enter_text(text);
}

fn next_field(app: &mut App) {
    let token = app.form_token().expect("form open");
    app.form_mode(token).next_field();
}

fn submit(app: &mut App) -> SubmitOutcome {
    let token = app.form_token().expect("form open");
    app.form_mode(token).submit()
}

fn fill_fields(app: &mut App, values: &[&str]) {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            next_field(app);
        }
        type_text(app, value);
    }
}

fn add_ana(app: &mut App) {
    app.select_tab(Tab::Students);
    app.open_add();
    fill_fields(
        app,
        &["Ana", "Diaz", "ana@x.com", "555", "2000-01-01", "http://x/a.png"],
    );
    assert!(matches!(submit(app), SubmitOutcome::Saved(EditTarget::Student(_))));
}

fn add_math(app: &mut App) {
    app.select_tab(Tab::Courses);
    app.open_add();
    fill_fields(app, &["Math", "Intro", "10"]);
    assert!(matches!(submit(app), SubmitOutcome::Saved(EditTarget::Course(_))));
}

fn enroll_first(app: &mut App) {
    app.select_tab(Tab::Enrollments);
    app.open_add();
    let token = app.form_token().expect("form open");
    let mut form = app.form_mode(token);
    form.cycle_choice(true);
    form.next_field();
    form.cycle_choice(true);
    assert!(matches!(
        submit(app),
        SubmitOutcome::Saved(EditTarget::Enrollment(_))
    ));
}

#[test]
fn new_app_starts_on_configured_tab() {
    let app = App::new(UiOptions::default(), Tab::Courses);
    assert_eq!(app.active_tab(), Tab::Courses);
    assert_eq!(app.input_mode(), InputMode::Normal);
    assert!(app.form_token().is_none());
}

#[test]
fn add_student_through_form() {
    let (mut app, _) = app();
    add_ana(&mut app);

    assert_eq!(app.input_mode(), InputMode::Normal);
    assert!(!app.view().is_modal_open());
    let student = &app.store().students()[0];
    assert_eq!(student.full_name(), "Ana Diaz");
    assert_eq!(student.email, "ana@x.com");
    assert_eq!(student.birth_date, date(2000, 1, 1));

    let status = app.status().expect("status set");
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.text, "Added student Ana Diaz");
}

#[test]
fn rejected_submit_keeps_form_open_without_mutation() {
    let (mut app, _) = app();
    app.open_add();
    fill_fields(&mut app, &["Ana", "Diaz", "a@b"]);

    let outcome = submit(&mut app);
    assert_eq!(outcome, SubmitOutcome::Rejected { errors: 4 });
    assert!(app.store().students().is_empty());
    assert_eq!(app.input_mode(), InputMode::Form);

    let form = app.form().expect("form still open");
    let rows = form.rows(app.store());
    let email = &rows[StudentField::Email.index()];
    assert_eq!(email.error, Some("Invalid email"));
    assert_eq!(rows[StudentField::FirstName.index()].error, None);
    assert_eq!(app.status().map(|s| s.kind), Some(StatusKind::Error));
}

#[test]
fn rejected_submit_shakes_modal_unless_reduced_motion() {
    let (mut app, _) = app();
    app.open_add();
    let _ = submit(&mut app);
    assert!(app.modal_effect_mut().is_some());

    let mut calm = App::new(
        UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        },
        Tab::Students,
    );
    calm.open_add();
    assert!(calm.modal_effect_mut().is_none());
    let _ = submit(&mut calm);
    assert!(calm.modal_effect_mut().is_none());
}

#[test]
fn edit_prefills_and_updates_in_place() {
    let (mut app, _) = app();
    add_math(&mut app);
    app.open_edit_selected();

    let form = app.form().expect("edit form");
    assert!(form.is_editing());
    assert_eq!(form.title(), "Edit course");
    assert_eq!(form.submit_label(), "Update course");
    assert_eq!(form.course_draft().map(|d| d.name), Some("Math".to_string()));

    next_field(&mut app);
    next_field(&mut app);
    let token = app.form_token().expect("form open");
    let mut mode = app.form_mode(token);
    mode.clear_field();
    mode.enter_text("12");
    assert!(matches!(mode.submit(), SubmitOutcome::Saved(_)));

    assert_eq!(app.store().courses().len(), 1);
    let course = &app.store().courses()[0];
    assert_eq!(course.duration_hours, 12);
    assert_eq!(course.name, "Math");
}

#[test]
fn cancel_closes_without_mutating() {
    let (mut app, _) = app();
    app.open_add();
    type_text(&mut app, "Ana");
    let token = app.form_token().expect("form open");
    app.form_mode(token).cancel();

    assert!(app.form().is_none());
    assert!(!app.view().is_modal_open());
    assert!(app.store().students().is_empty());
}

#[test]
fn open_add_after_edit_creates_new_entity() {
    let (mut app, _) = app();
    add_math(&mut app);
    app.open_edit_selected();
    app.cancel_form();

    app.open_add();
    assert_eq!(app.view().edit_target(), None);
    fill_fields(&mut app, &["Art", "Colour", "4"]);
    assert!(matches!(submit(&mut app), SubmitOutcome::Saved(_)));
    assert_eq!(app.store().courses().len(), 2);
    assert_eq!(app.view().row_cursor(Tab::Courses), 1);
}

#[test]
fn enrollment_choice_cycles_and_registers_today() {
    let (mut app, _) = app();
    add_ana(&mut app);
    add_math(&mut app);
    enroll_first(&mut app);

    let enrollment = &app.store().enrollments()[0];
    assert_eq!(enrollment.registered_on(), date(2024, 3, 1));
    assert_eq!(enrollment.status, EnrollmentStatus::Active);
    assert_eq!(
        app.status().map(|s| s.text.as_str()),
        Some("Added enrollment Ana Diaz in Math")
    );
}

#[test]
fn enrollment_status_edit_keeps_registration_date() {
    let (mut app, clock) = app();
    add_ana(&mut app);
    add_math(&mut app);
    enroll_first(&mut app);

    clock.advance_days(7);
    app.open_edit_selected();
    let token = app.form_token().expect("form open");
    let mut form = app.form_mode(token);
    form.prev_field();
    form.enter_char(' ');
    assert!(matches!(form.submit(), SubmitOutcome::Saved(_)));

    let enrollment = &app.store().enrollments()[0];
    assert_eq!(enrollment.status, EnrollmentStatus::Inactive);
    assert_eq!(enrollment.registered_on(), date(2024, 3, 1));
}

#[test]
fn empty_enrollment_is_rejected() {
    let (mut app, _) = app();
    app.select_tab(Tab::Enrollments);
    app.open_add();
    assert_eq!(submit(&mut app), SubmitOutcome::Rejected { errors: 2 });
    assert!(app.store().enrollments().is_empty());
}

#[test]
fn deleting_student_cascades_to_enrollments() {
    let (mut app, _) = app();
    add_ana(&mut app);
    add_math(&mut app);
    enroll_first(&mut app);

    app.select_tab(Tab::Students);
    app.delete_selected();

    assert!(app.store().students().is_empty());
    assert_eq!(app.store().courses().len(), 1);
    assert!(app.store().enrollments().is_empty());
    assert_eq!(
        app.status().map(|s| s.text.as_str()),
        Some("Deleted student Ana Diaz and 1 enrollment")
    );
    assert_eq!(app.selected_row(Tab::Enrollments), None);
}

#[test]
fn delete_on_empty_table_warns() {
    let (mut app, _) = app();
    app.select_tab(Tab::Courses);
    app.delete_selected();
    assert_eq!(app.status().map(|s| s.kind), Some(StatusKind::Warning));
}

#[test]
fn tab_switch_keeps_data_and_cursor() {
    let (mut app, _) = app();
    add_ana(&mut app);
    add_ana(&mut app);
    app.select_tab(Tab::Students);
    app.move_selection(-1);
    assert_eq!(app.selected_row(Tab::Students), Some(0));

    app.next_tab();
    assert_eq!(app.active_tab(), Tab::Courses);
    app.prev_tab();
    assert_eq!(app.selected_row(Tab::Students), Some(0));
    assert_eq!(app.store().students().len(), 2);
}

#[test]
fn paste_flattens_line_breaks() {
    let (mut app, _) = app();
    app.select_tab(Tab::Courses);
    app.open_add();
    next_field(&mut app);
    type_text(&mut app, "line one\r\nline two\n");
    let draft = app.form().and_then(|f| f.course_draft()).expect("course form");
    assert_eq!(draft.description, "line one line two ");
}

#[test]
fn enrollment_choices_wrap_back_to_unselected() {
    let (mut app, _) = app();
    add_ana(&mut app);
    app.select_tab(Tab::Enrollments);
    app.open_add();

    let token = app.form_token().expect("form open");
    let mut form = app.form_mode(token);
    form.right();
    let draft = form.app.form().and_then(|f| f.enrollment_draft()).expect("enrollment form");
    assert!(draft.student.is_some());

    form.right();
    let draft = form.app.form().and_then(|f| f.enrollment_draft()).expect("enrollment form");
    assert_eq!(draft.student, None);
    assert_eq!(draft.course, None);
    assert_eq!(draft.status, EnrollmentStatus::Active);
}
