//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use roster_core::{EntityStore, ManualClock};
use roster_engine::App;
use roster_types::{CourseDraft, StudentDraft};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Store whose registration dates come from a clock the test controls.
pub fn store_on(day: NaiveDate) -> (EntityStore, ManualClock) {
    let clock = ManualClock::new(day);
    (EntityStore::with_clock(clock.clone()), clock)
}

pub fn app_on(day: NaiveDate) -> (App, ManualClock) {
    let (store, clock) = store_on(day);
    (App::with_store(store), clock)
}

pub fn ana_draft() -> StudentDraft {
    StudentDraft {
        first_name: "Ana".into(),
        last_name: "Diaz".into(),
        email: "ana@x.com".into(),
        phone: "555".into(),
        birth_date: "2000-01-01".into(),
        profile_url: "http://x/a.png".into(),
    }
}

pub fn math_draft() -> CourseDraft {
    CourseDraft {
        name: "Math".into(),
        description: "Intro".into(),
        duration_hours: "10".into(),
    }
}

pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn char_key(c: char) -> Event {
    key(KeyCode::Char(c))
}

/// Feed `keys` through the same dispatcher the terminal loop uses.
pub fn press(app: &mut App, keys: impl IntoIterator<Item = Event>) {
    for event in keys {
        roster_tui::apply_event(app, event);
    }
}

pub fn type_text(app: &mut App, text: &str) {
    press(app, text.chars().map(char_key));
}
