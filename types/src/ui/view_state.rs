//! View and selection state.
//!
//! Three orthogonal pieces drive what is on screen: the active tab, the edit
//! target (which entity a submitted form updates, or none to create), and
//! whether the form modal is visible. Row cursors and animation state ride
//! along because the renderer reads them from the same place.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::ModalEffect;
use crate::ids::{CourseId, EnrollmentId, StudentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Students,
    Courses,
    Enrollments,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::Students, Self::Courses, Self::Enrollments];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Students => "Students",
            Self::Courses => "Courses",
            Self::Enrollments => "Enrollments",
        }
    }

    /// Lowercase singular noun, used in button and form labels.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Students => "student",
            Self::Courses => "course",
            Self::Enrollments => "enrollment",
        }
    }

    /// Label of the create button for this tab, e.g. "Add student".
    #[must_use]
    pub fn add_label(self) -> String {
        format!("Add {}", self.noun())
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Students => 0,
            Self::Courses => 1,
            Self::Enrollments => 2,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Students => Self::Courses,
            Self::Courses => Self::Enrollments,
            Self::Enrollments => Self::Students,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Students => Self::Enrollments,
            Self::Courses => Self::Students,
            Self::Enrollments => Self::Courses,
        }
    }
}

/// The entity a submitted form will update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditTarget {
    Student(StudentId),
    Course(CourseId),
    Enrollment(EnrollmentId),
}

impl EditTarget {
    #[must_use]
    pub const fn tab(self) -> Tab {
        match self {
            Self::Student(_) => Tab::Students,
            Self::Course(_) => Tab::Courses,
            Self::Enrollment(_) => Tab::Enrollments,
        }
    }
}

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}

#[derive(Debug)]
pub struct ViewState {
    active_tab: Tab,
    edit_target: Option<EditTarget>,
    modal_open: bool,
    /// Selected row per tab, indexed by [`Tab::index`].
    row_cursor: [usize; 3],
    pub modal_effect: Option<ModalEffect>,
    pub ui_options: UiOptions,
    /// Timestamp of last frame (for animation timing).
    pub last_frame: Instant,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_tab: Tab::default(),
            edit_target: None,
            modal_open: false,
            row_cursor: [0; 3],
            modal_effect: None,
            ui_options: UiOptions::default(),
            last_frame: Instant::now(),
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    #[must_use]
    pub fn edit_target(&self) -> Option<EditTarget> {
        self.edit_target
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Switch tabs. Modal visibility and edit target are left untouched.
    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Open the modal in create mode.
    pub fn open_add(&mut self) {
        self.edit_target = None;
        self.modal_open = true;
    }

    /// Open the modal to edit `target`.
    pub fn open_edit(&mut self, target: EditTarget) {
        self.edit_target = Some(target);
        self.modal_open = true;
    }

    /// Hide the modal. The edit target is reset by the next open.
    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    #[must_use]
    pub fn row_cursor(&self, tab: Tab) -> usize {
        self.row_cursor[tab.index()]
    }

    /// Move the cursor of `tab` by `delta` rows within `0..len`.
    pub fn move_row_cursor(&mut self, tab: Tab, delta: isize, len: usize) {
        let current = self.row_cursor[tab.index()];
        let moved = current.saturating_add_signed(delta);
        self.row_cursor[tab.index()] = moved.min(len.saturating_sub(1));
    }

    /// Put the cursor of `tab` on the last of `len` rows.
    pub fn select_last_row(&mut self, tab: Tab, len: usize) {
        self.row_cursor[tab.index()] = len.saturating_sub(1);
    }

    /// Keep the cursor of `tab` inside a collection of `len` rows.
    pub fn clamp_row_cursor(&mut self, tab: Tab, len: usize) {
        let cursor = &mut self.row_cursor[tab.index()];
        *cursor = (*cursor).min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::{EditTarget, Tab, ViewState};
    use crate::ids::{CourseId, StudentId};

    #[test]
    fn select_tab_leaves_modal_and_target_alone() {
        let mut view = ViewState::new();
        view.open_edit(EditTarget::Student(StudentId::new(4)));
        view.select_tab(Tab::Courses);

        assert_eq!(view.active_tab(), Tab::Courses);
        assert!(view.is_modal_open());
        assert_eq!(
            view.edit_target(),
            Some(EditTarget::Student(StudentId::new(4)))
        );
    }

    #[test]
    fn open_add_clears_previous_target() {
        let mut view = ViewState::new();
        view.open_edit(EditTarget::Course(CourseId::new(1)));
        view.close_modal();
        view.open_add();

        assert!(view.is_modal_open());
        assert_eq!(view.edit_target(), None);
    }

    #[test]
    fn close_keeps_target_until_next_open() {
        let mut view = ViewState::new();
        view.open_edit(EditTarget::Course(CourseId::new(9)));
        view.close_modal();

        assert!(!view.is_modal_open());
        assert_eq!(view.edit_target(), Some(EditTarget::Course(CourseId::new(9))));
    }

    #[test]
    fn row_cursor_is_clamped_per_tab() {
        let mut view = ViewState::new();
        view.move_row_cursor(Tab::Students, 5, 3);
        assert_eq!(view.row_cursor(Tab::Students), 2);
        assert_eq!(view.row_cursor(Tab::Courses), 0);

        view.move_row_cursor(Tab::Students, -10, 3);
        assert_eq!(view.row_cursor(Tab::Students), 0);

        view.move_row_cursor(Tab::Students, 2, 3);
        view.clamp_row_cursor(Tab::Students, 1);
        assert_eq!(view.row_cursor(Tab::Students), 0);

        view.select_last_row(Tab::Courses, 4);
        assert_eq!(view.row_cursor(Tab::Courses), 3);
        view.select_last_row(Tab::Courses, 0);
        assert_eq!(view.row_cursor(Tab::Courses), 0);
    }

    #[test]
    fn tab_cycle_and_labels() {
        assert_eq!(Tab::Enrollments.next(), Tab::Students);
        assert_eq!(Tab::Students.prev(), Tab::Enrollments);
        assert_eq!(Tab::Courses.add_label(), "Add course");
    }
}
