//! Application controller for Roster.
//!
//! This crate owns the entity store, view state and open form, and turns user
//! intents into store mutations. It has no terminal dependencies.

use std::time::{Duration, Instant};

pub use roster_core::{EntityStore, FieldErrors, Removed};
pub use roster_types::ui::{EditTarget, ModalEffect, Tab, UiOptions, ViewState};

mod draft_input;
mod form;
mod form_mode;

pub use draft_input::DraftInput;
pub use form::{FormRow, FormRowKind, FormState};
pub use form_mode::{FormMode, FormToken};

use form::ValidEntity;
use roster_types::{CoursePatch, EnrollmentPatch, StudentPatch};

const MODAL_POP_DURATION: Duration = Duration::from_millis(180);
const MODAL_SHAKE_DURATION: Duration = Duration::from_millis(300);
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
    set_at: Instant,
}

/// Result of submitting the open form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The store was mutated and the modal closed.
    Saved(EditTarget),
    /// Validation failed; the form stays open with `errors` messages.
    Rejected { errors: usize },
    /// No form was open.
    Ignored,
}

#[derive(Debug)]
pub struct App {
    store: EntityStore,
    view: ViewState,
    form: Option<FormState>,
    status: Option<StatusLine>,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::with_store(EntityStore::new())
    }
}

impl App {
    #[must_use]
    pub fn new(ui_options: UiOptions, initial_tab: Tab) -> Self {
        let mut app = Self::default();
        app.view.ui_options = ui_options;
        app.view.select_tab(initial_tab);
        app
    }

    #[must_use]
    pub fn with_store(store: EntityStore) -> Self {
        Self {
            store,
            view: ViewState::new(),
            form: None,
            status: None,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.view.ui_options
    }

    #[must_use]
    pub fn active_tab(&self) -> Tab {
        self.view.active_tab()
    }

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.view.is_modal_open() && self.form.is_some() {
            InputMode::Form
        } else {
            InputMode::Normal
        }
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // ------------------------------------------------------------------
    // Tabs and rows
    // ------------------------------------------------------------------

    pub fn select_tab(&mut self, tab: Tab) {
        self.view.select_tab(tab);
    }

    pub fn next_tab(&mut self) {
        self.view.select_tab(self.view.active_tab().next());
    }

    pub fn prev_tab(&mut self) {
        self.view.select_tab(self.view.active_tab().prev());
    }

    #[must_use]
    pub fn row_count(&self, tab: Tab) -> usize {
        match tab {
            Tab::Students => self.store.students().len(),
            Tab::Courses => self.store.courses().len(),
            Tab::Enrollments => self.store.enrollments().len(),
        }
    }

    /// Selected row index in `tab`, or `None` when the table is empty.
    #[must_use]
    pub fn selected_row(&self, tab: Tab) -> Option<usize> {
        let len = self.row_count(tab);
        (len > 0).then(|| self.view.row_cursor(tab).min(len - 1))
    }

    pub fn move_selection(&mut self, delta: isize) {
        let tab = self.view.active_tab();
        let len = self.row_count(tab);
        self.view.move_row_cursor(tab, delta, len);
    }

    /// The entity under the row cursor of the active tab.
    #[must_use]
    pub fn selected_target(&self) -> Option<EditTarget> {
        let tab = self.view.active_tab();
        let row = self.selected_row(tab)?;
        match tab {
            Tab::Students => self
                .store
                .students()
                .get(row)
                .map(|s| EditTarget::Student(s.id())),
            Tab::Courses => self
                .store
                .courses()
                .get(row)
                .map(|c| EditTarget::Course(c.id())),
            Tab::Enrollments => self
                .store
                .enrollments()
                .get(row)
                .map(|e| EditTarget::Enrollment(e.id())),
        }
    }

    // ------------------------------------------------------------------
    // Modal
    // ------------------------------------------------------------------

    /// Open an empty form for the active tab's entity kind.
    pub fn open_add(&mut self) {
        let tab = self.view.active_tab();
        self.view.open_add();
        self.form = Some(FormState::create(tab));
        self.start_modal_effect(ModalEffect::pop_scale(MODAL_POP_DURATION));
        tracing::debug!(tab = tab.title(), "Opened create form");
    }

    pub fn open_edit_selected(&mut self) {
        match self.selected_target() {
            Some(target) => self.open_edit(target),
            None => self.set_status_warning(format!(
                "No {} selected",
                self.view.active_tab().noun()
            )),
        }
    }

    /// Open a form pre-filled from `target`. Unknown ids leave the view as is.
    pub fn open_edit(&mut self, target: EditTarget) {
        let form = match target {
            EditTarget::Student(id) => self.store.student(id).map(FormState::edit_student),
            EditTarget::Course(id) => self.store.course(id).map(FormState::edit_course),
            EditTarget::Enrollment(id) => {
                self.store.enrollment(id).map(FormState::edit_enrollment)
            }
        };
        let Some(form) = form else {
            tracing::debug!(?target, "Edit target not found");
            return;
        };
        self.view.select_tab(target.tab());
        self.view.open_edit(target);
        self.form = Some(form);
        self.start_modal_effect(ModalEffect::pop_scale(MODAL_POP_DURATION));
        tracing::debug!(?target, "Opened edit form");
    }

    /// Close the modal without touching the store.
    pub fn cancel_form(&mut self) {
        if self.form.take().is_some() {
            tracing::debug!("Form cancelled");
        }
        self.view.close_modal();
        self.clear_modal_effect();
    }

    /// Validate the open form and, if valid, add or update the entity.
    ///
    /// The edit target selects update; otherwise a new entity is appended and
    /// selected.
    pub fn submit_form(&mut self) -> SubmitOutcome {
        let Some(form) = self.form.as_mut() else {
            return SubmitOutcome::Ignored;
        };

        let valid = match form.validate(&self.store) {
            Ok(valid) => valid,
            Err(errors) => {
                let noun = form.kind().noun();
                self.start_modal_effect(ModalEffect::shake(MODAL_SHAKE_DURATION));
                let plural = if errors == 1 { "" } else { "s" };
                self.set_status_error(format!("Fix {errors} field{plural} to save this {noun}"));
                tracing::debug!(errors, noun, "Form rejected");
                return SubmitOutcome::Rejected { errors };
            }
        };

        let target = self.view.edit_target().filter(|t| t.tab() == form.kind());
        let saved = match target {
            Some(target) => self.apply_update(target, valid),
            None => self.apply_add(valid),
        };

        self.form = None;
        self.view.close_modal();
        self.clear_modal_effect();
        SubmitOutcome::Saved(saved)
    }

    fn apply_add(&mut self, valid: ValidEntity) -> EditTarget {
        let target = match valid {
            ValidEntity::Student(new) => EditTarget::Student(self.store.add_student(new)),
            ValidEntity::Course(new) => EditTarget::Course(self.store.add_course(new)),
            ValidEntity::Enrollment(new) => {
                EditTarget::Enrollment(self.store.add_enrollment(new))
            }
        };
        let tab = target.tab();
        self.view.select_last_row(tab, self.row_count(tab));
        let label = self.describe(target);
        tracing::info!(?target, "Added {}", tab.noun());
        self.set_status_success(format!("Added {} {label}", tab.noun()));
        target
    }

    fn apply_update(&mut self, target: EditTarget, valid: ValidEntity) -> EditTarget {
        let updated = match (target, valid) {
            (EditTarget::Student(id), ValidEntity::Student(new)) => {
                self.store.update_student(id, StudentPatch::from(new))
            }
            (EditTarget::Course(id), ValidEntity::Course(new)) => {
                self.store.update_course(id, CoursePatch::from(new))
            }
            (EditTarget::Enrollment(id), ValidEntity::Enrollment(new)) => {
                self.store.update_enrollment(id, EnrollmentPatch::from(new))
            }
            _ => false,
        };
        let noun = target.tab().noun();
        if updated {
            let label = self.describe(target);
            tracing::info!(?target, "Updated {noun}");
            self.set_status_success(format!("Updated {noun} {label}"));
        } else {
            self.set_status_warning(format!("That {noun} no longer exists"));
        }
        target
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    pub fn delete_selected(&mut self) {
        match self.selected_target() {
            Some(target) => self.delete(target),
            None => self.set_status_warning(format!(
                "No {} selected",
                self.view.active_tab().noun()
            )),
        }
    }

    /// Remove `target`, cascading to enrollments for students and courses.
    /// Unknown ids are ignored.
    pub fn delete(&mut self, target: EditTarget) {
        let label = self.describe(target);
        let cascaded = match target {
            EditTarget::Student(id) => self.store.remove_student(id).map(|r| r.cascaded.len()),
            EditTarget::Course(id) => self.store.remove_course(id).map(|r| r.cascaded.len()),
            EditTarget::Enrollment(id) => self.store.remove_enrollment(id).map(|_| 0),
        };
        let Some(cascaded) = cascaded else {
            tracing::debug!(?target, "Delete target not found");
            return;
        };

        for tab in Tab::ALL {
            let len = self.row_count(tab);
            self.view.clamp_row_cursor(tab, len);
        }

        let noun = target.tab().noun();
        tracing::info!(?target, cascaded, "Deleted {noun}");
        let message = match cascaded {
            0 => format!("Deleted {noun} {label}"),
            1 => format!("Deleted {noun} {label} and 1 enrollment"),
            n => format!("Deleted {noun} {label} and {n} enrollments"),
        };
        self.set_status_success(message);
    }

    /// Human-readable name of `target` for status messages.
    fn describe(&self, target: EditTarget) -> String {
        match target {
            EditTarget::Student(id) => self
                .store
                .student(id)
                .map(roster_types::Student::full_name)
                .unwrap_or_default(),
            EditTarget::Course(id) => self
                .store
                .course(id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            EditTarget::Enrollment(id) => self
                .store
                .enrollment(id)
                .map(|e| {
                    let names = self.store.enrollment_names(e);
                    format!(
                        "{} in {}",
                        names.student.map_or_else(|| e.student.to_string(), |s| s.full_name()),
                        names.course.map_or_else(|| e.course.to_string(), |c| c.name.clone()),
                    )
                })
                .unwrap_or_default(),
        }
    }

    // ------------------------------------------------------------------
    // Status line and animation
    // ------------------------------------------------------------------

    pub fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status = Some(StatusLine {
            kind,
            text: message.into(),
            set_at: Instant::now(),
        });
    }

    pub fn set_status_success(&mut self, message: impl Into<String>) {
        self.set_status(StatusKind::Success, message);
    }

    pub fn set_status_warning(&mut self, message: impl Into<String>) {
        self.set_status(StatusKind::Warning, message);
    }

    pub fn set_status_error(&mut self, message: impl Into<String>) {
        self.set_status(StatusKind::Error, message);
    }

    /// Expire the status line once it has been shown long enough.
    pub fn tick(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.set_at.elapsed() >= STATUS_TTL)
        {
            self.status = None;
        }
    }

    pub fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.view.last_frame);
        self.view.last_frame = now;
        elapsed
    }

    pub fn modal_effect_mut(&mut self) -> Option<&mut ModalEffect> {
        self.view.modal_effect.as_mut()
    }

    pub fn clear_modal_effect(&mut self) {
        self.view.modal_effect = None;
    }

    fn start_modal_effect(&mut self, effect: ModalEffect) {
        if self.view.ui_options.reduced_motion {
            return;
        }
        self.view.modal_effect = Some(effect);
        self.view.last_frame = Instant::now();
    }
}

#[cfg(test)]
mod tests;
