//! Proof-token wrapper for form editing.
//!
//! Key handlers obtain a [`FormToken`] only while a form is open, so every
//! operation here can assume the form exists.

use crate::{App, DraftInput, FormState, SubmitOutcome};

/// Proof token for Form mode operations.
#[derive(Debug)]
pub struct FormToken(());

/// Mode wrapper for safe form operations.
pub struct FormMode<'a> {
    pub(crate) app: &'a mut App,
}

impl App {
    /// Get proof token if a form is open.
    #[must_use]
    pub fn form_token(&self) -> Option<FormToken> {
        (self.view.is_modal_open() && self.form.is_some()).then_some(FormToken(()))
    }

    /// Get form mode wrapper (requires proof token).
    pub fn form_mode(&mut self, _token: FormToken) -> FormMode<'_> {
        FormMode { app: self }
    }
}

impl FormMode<'_> {
    fn form_mut(&mut self) -> Option<&mut FormState> {
        self.app.form.as_mut()
    }

    fn input_mut(&mut self) -> Option<&mut DraftInput> {
        self.form_mut()?.focused_input_mut()
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(input) = self.input_mut() {
            input.enter_char(c);
        } else if c == ' ' {
            self.cycle_choice(true);
        }
    }

    /// Insert pasted text. Line breaks become spaces since every field is a
    /// single line.
    pub fn enter_text(&mut self, text: &str) {
        let Some(input) = self.input_mut() else {
            return;
        };
        let flattened: String = text
            .replace("\r\n", " ")
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        input.enter_text(&flattened);
    }

    pub fn delete_char(&mut self) {
        if let Some(input) = self.input_mut() {
            input.delete_char();
        }
    }

    pub fn delete_char_forward(&mut self) {
        if let Some(input) = self.input_mut() {
            input.delete_char_forward();
        }
    }

    pub fn delete_word_backwards(&mut self) {
        if let Some(input) = self.input_mut() {
            input.delete_word_backwards();
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(input) = self.input_mut() {
            input.clear();
        }
    }

    /// Move the caret left, or step a choice backwards.
    pub fn left(&mut self) {
        if let Some(input) = self.input_mut() {
            input.move_cursor_left();
        } else {
            self.cycle_choice(false);
        }
    }

    /// Move the caret right, or step a choice forwards.
    pub fn right(&mut self) {
        if let Some(input) = self.input_mut() {
            input.move_cursor_right();
        } else {
            self.cycle_choice(true);
        }
    }

    pub fn reset_cursor(&mut self) {
        if let Some(input) = self.input_mut() {
            input.reset_cursor();
        }
    }

    pub fn move_cursor_end(&mut self) {
        if let Some(input) = self.input_mut() {
            input.move_cursor_end();
        }
    }

    pub fn next_field(&mut self) {
        if let Some(form) = self.form_mut() {
            form.focus_next();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(form) = self.form_mut() {
            form.focus_prev();
        }
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        let app = &mut *self.app;
        if let Some(form) = app.form.as_mut() {
            form.cycle_choice(&app.store, forward);
        }
    }

    pub fn submit(self) -> SubmitOutcome {
        self.app.submit_form()
    }

    pub fn cancel(self) {
        self.app.cancel_form();
    }
}
