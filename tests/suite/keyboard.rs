//! Key-driven flows, fed through the terminal event dispatcher.

use crossterm::event::KeyCode;
use roster_engine::{InputMode, Tab};
use roster_types::EnrollmentStatus;

use crate::common::{app_on, char_key, date, key, press, type_text};

fn fill_student(app: &mut roster_engine::App) {
    let fields = ["Ana", "Diaz", "ana@x.com", "555", "2000-01-01", "http://x/a.png"];
    for (i, value) in fields.iter().enumerate() {
        if i > 0 {
            press(app, [key(KeyCode::Tab)]);
        }
        type_text(app, value);
    }
}

#[test]
fn full_scenario_by_keyboard() {
    let (mut app, _) = app_on(date(2024, 9, 2));

    press(&mut app, [char_key('1'), char_key('a')]);
    fill_student(&mut app);
    press(&mut app, [key(KeyCode::Enter)]);
    assert_eq!(app.store().students().len(), 1);

    press(&mut app, [char_key('2'), char_key('a')]);
    type_text(&mut app, "Math");
    press(&mut app, [key(KeyCode::Tab)]);
    type_text(&mut app, "Intro");
    press(&mut app, [key(KeyCode::Tab)]);
    type_text(&mut app, "10");
    press(&mut app, [key(KeyCode::Enter)]);
    assert_eq!(app.store().courses().len(), 1);

    press(
        &mut app,
        [
            char_key('3'),
            char_key('a'),
            key(KeyCode::Right),
            key(KeyCode::Down),
            char_key(' '),
            key(KeyCode::Enter),
        ],
    );
    assert_eq!(app.store().enrollments().len(), 1);
    assert_eq!(app.store().enrollments()[0].status, EnrollmentStatus::Active);
    assert_eq!(app.store().enrollments()[0].registered_on(), date(2024, 9, 2));

    press(&mut app, [char_key('1'), char_key('d')]);
    assert!(app.store().students().is_empty());
    assert_eq!(app.store().courses().len(), 1);
    assert!(app.store().enrollments().is_empty());
}

#[test]
fn invalid_submit_keeps_modal_open() {
    let (mut app, _) = app_on(date(2024, 9, 2));
    press(&mut app, [char_key('a')]);
    type_text(&mut app, "Ana");
    press(&mut app, [key(KeyCode::Enter)]);

    assert_eq!(app.input_mode(), InputMode::Form);
    assert_eq!(app.form().map(|f| f.error_count()), Some(5));
    assert!(app.store().students().is_empty());

    press(&mut app, [key(KeyCode::Esc)]);
    assert_eq!(app.input_mode(), InputMode::Normal);
}

#[test]
fn edit_with_enter_prefills_form() {
    let (mut app, _) = app_on(date(2024, 9, 2));
    press(&mut app, [char_key('a')]);
    fill_student(&mut app);
    press(&mut app, [key(KeyCode::Enter)]);

    press(&mut app, [key(KeyCode::Enter)]);
    let draft = app
        .form()
        .and_then(|f| f.student_draft())
        .expect("student edit form");
    assert_eq!(draft.first_name, "Ana");
    assert_eq!(draft.birth_date, "2000-01-01");

    press(&mut app, [key(KeyCode::Backspace), key(KeyCode::Backspace)]);
    type_text(&mut app, "ne");
    press(&mut app, [key(KeyCode::Enter)]);
    assert_eq!(app.store().students()[0].first_name, "Ane");
    assert_eq!(app.store().students().len(), 1);
}

#[test]
fn arrow_keys_move_between_tabs_and_rows() {
    let (mut app, _) = app_on(date(2024, 9, 2));
    press(&mut app, [key(KeyCode::Right), key(KeyCode::Right)]);
    assert_eq!(app.active_tab(), Tab::Enrollments);
    press(&mut app, [key(KeyCode::Left)]);
    assert_eq!(app.active_tab(), Tab::Courses);
    press(&mut app, [key(KeyCode::Down), key(KeyCode::Up)]);
    assert_eq!(app.selected_row(Tab::Courses), None);
}
