//! Input handling for Roster TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use roster_engine::{App, InputMode, Tab};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close first so a sender blocked on capacity wakes up.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending input into `app`. Returns `true` once the app should quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event. Returns `true` once the app should quit.
pub fn apply_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            if matches!(key.kind, KeyEventKind::Release) {
                return app.should_quit();
            }

            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                app.request_quit();
                return true;
            }

            match app.input_mode() {
                InputMode::Normal => handle_normal_mode(app, key),
                InputMode::Form => handle_form_mode(app, key),
            }
        }
        Event::Paste(text) => {
            if let Some(token) = app.form_token() {
                app.form_mode(token).enter_text(&text);
            }
        }
        _ => {}
    }
    app.should_quit()
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char('1') => app.select_tab(Tab::Students),
        KeyCode::Char('2') => app.select_tab(Tab::Courses),
        KeyCode::Char('3') => app.select_tab(Tab::Enrollments),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_tab(),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Home | KeyCode::Char('g') => app.move_selection(isize::MIN),
        KeyCode::End | KeyCode::Char('G') => app.move_selection(isize::MAX),
        KeyCode::Char('a') => app.open_add(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        _ => {}
    }
}

fn handle_form_mode(app: &mut App, key: KeyEvent) {
    let Some(token) = app.form_token() else {
        return;
    };
    let mut form = app.form_mode(token);

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('u') => form.clear_field(),
            KeyCode::Char('w') => form.delete_word_backwards(),
            KeyCode::Char('a') => form.reset_cursor(),
            KeyCode::Char('e') => form.move_cursor_end(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => form.cancel(),
        KeyCode::Enter => {
            let outcome = form.submit();
            debug!(?outcome, "Form submitted");
        }
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left => form.left(),
        KeyCode::Right => form.right(),
        KeyCode::Home => form.reset_cursor(),
        KeyCode::End => form.move_cursor_end(),
        KeyCode::Backspace => form.delete_char(),
        KeyCode::Delete => form.delete_char_forward(),
        KeyCode::Char(c) => form.enter_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use roster_engine::{App, InputMode, Tab};

    use super::apply_event;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            apply_event(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn number_keys_switch_tabs() {
        let mut app = App::default();
        apply_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.active_tab(), Tab::Enrollments);
        apply_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.active_tab(), Tab::Students);
        apply_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.active_tab(), Tab::Enrollments);
    }

    #[test]
    fn q_quits_only_outside_form() {
        let mut app = App::default();
        apply_event(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.input_mode(), InputMode::Form);
        assert!(!apply_event(&mut app, key(KeyCode::Char('q'))));
        apply_event(&mut app, key(KeyCode::Esc));
        assert!(apply_event(&mut app, key(KeyCode::Char('q'))));
    }

    #[test]
    fn ctrl_c_quits_from_form() {
        let mut app = App::default();
        apply_event(&mut app, key(KeyCode::Char('a')));
        assert!(apply_event(&mut app, ctrl('c')));
        assert!(app.should_quit());
    }

    #[test]
    fn typing_a_course_and_submitting() {
        let mut app = App::default();
        apply_event(&mut app, key(KeyCode::Char('2')));
        apply_event(&mut app, key(KeyCode::Char('a')));
        type_str(&mut app, "Math");
        apply_event(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "Intro");
        apply_event(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "10");
        apply_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.input_mode(), InputMode::Normal);
        let course = &app.store().courses()[0];
        assert_eq!(course.name, "Math");
        assert_eq!(course.duration_hours, 10);
    }

    #[test]
    fn ctrl_u_clears_focused_field() {
        let mut app = App::default();
        apply_event(&mut app, key(KeyCode::Char('a')));
        type_str(&mut app, "Ana");
        apply_event(&mut app, ctrl('u'));
        let draft = app.form().and_then(|f| f.student_draft()).expect("student form");
        assert_eq!(draft.first_name, "");
    }

    #[test]
    fn paste_goes_into_focused_field() {
        let mut app = App::default();
        apply_event(&mut app, key(KeyCode::Char('a')));
        apply_event(&mut app, Event::Paste("Ana Maria".to_string()));
        let draft = app.form().and_then(|f| f.student_draft()).expect("student form");
        assert_eq!(draft.first_name, "Ana Maria");
    }

    #[test]
    fn paste_in_normal_mode_is_ignored() {
        let mut app = App::default();
        apply_event(&mut app, Event::Paste("q".to_string()));
        assert!(!app.should_quit());
        assert!(app.form().is_none());
    }
}
