//! State of the open entity form.
//!
//! A form is created when the modal opens and dropped when it closes. It
//! holds the draft being edited, which row has focus, and the errors from the
//! last rejected submit.

use roster_core::{EntityStore, FieldErrors, validate_course, validate_enrollment, validate_student};
use roster_types::ui::Tab;
use roster_types::{
    Course, CourseDraft, CourseField, CourseId, Enrollment, EnrollmentDraft, EnrollmentField,
    FormField, NewCourse, NewEnrollment, NewStudent, Student, StudentDraft, StudentField, StudentId,
};

use crate::draft_input::DraftInput;

/// Output of a successful validation, ready for the store.
#[derive(Debug, Clone)]
pub(crate) enum ValidEntity {
    Student(NewStudent),
    Course(NewCourse),
    Enrollment(NewEnrollment),
}

#[derive(Debug, Clone)]
enum FormBody {
    Student {
        inputs: Vec<DraftInput>,
        errors: FieldErrors<StudentField>,
    },
    Course {
        inputs: Vec<DraftInput>,
        errors: FieldErrors<CourseField>,
    },
    Enrollment {
        draft: EnrollmentDraft,
        errors: FieldErrors<EnrollmentField>,
    },
}

/// How a form row is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRowKind {
    /// Free text. `caret` is the grapheme index when the row has focus.
    Text { caret: Option<usize> },
    /// Cycles through a fixed list of options.
    Choice,
}

/// One row of the form as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow<'a> {
    pub label: &'static str,
    pub value: String,
    /// `value` is a prompt rather than a selection.
    pub placeholder: bool,
    pub kind: FormRowKind,
    pub focused: bool,
    pub error: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct FormState {
    kind: Tab,
    editing: bool,
    focus: usize,
    body: FormBody,
}

impl FormState {
    /// Empty form for creating an entity of `kind`.
    #[must_use]
    pub fn create(kind: Tab) -> Self {
        let body = match kind {
            Tab::Students => FormBody::Student {
                inputs: vec![DraftInput::default(); StudentField::ALL.len()],
                errors: FieldErrors::new(),
            },
            Tab::Courses => FormBody::Course {
                inputs: vec![DraftInput::default(); CourseField::ALL.len()],
                errors: FieldErrors::new(),
            },
            Tab::Enrollments => FormBody::Enrollment {
                draft: EnrollmentDraft::default(),
                errors: FieldErrors::new(),
            },
        };
        Self {
            kind,
            editing: false,
            focus: 0,
            body,
        }
    }

    #[must_use]
    pub fn edit_student(student: &Student) -> Self {
        let draft = StudentDraft::from_student(student);
        let inputs = [
            draft.first_name,
            draft.last_name,
            draft.email,
            draft.phone,
            draft.birth_date,
            draft.profile_url,
        ]
        .into_iter()
        .map(DraftInput::with_text)
        .collect();
        Self {
            kind: Tab::Students,
            editing: true,
            focus: 0,
            body: FormBody::Student {
                inputs,
                errors: FieldErrors::new(),
            },
        }
    }

    #[must_use]
    pub fn edit_course(course: &Course) -> Self {
        let draft = CourseDraft::from_course(course);
        let inputs = [draft.name, draft.description, draft.duration_hours]
            .into_iter()
            .map(DraftInput::with_text)
            .collect();
        Self {
            kind: Tab::Courses,
            editing: true,
            focus: 0,
            body: FormBody::Course {
                inputs,
                errors: FieldErrors::new(),
            },
        }
    }

    #[must_use]
    pub fn edit_enrollment(enrollment: &Enrollment) -> Self {
        Self {
            kind: Tab::Enrollments,
            editing: true,
            focus: 0,
            body: FormBody::Enrollment {
                draft: EnrollmentDraft::from_enrollment(enrollment),
                errors: FieldErrors::new(),
            },
        }
    }

    #[must_use]
    pub fn kind(&self) -> Tab {
        self.kind
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    #[must_use]
    pub fn title(&self) -> String {
        let verb = if self.editing { "Edit" } else { "Add" };
        format!("{verb} {}", self.kind.noun())
    }

    #[must_use]
    pub fn submit_label(&self) -> String {
        let verb = if self.editing { "Update" } else { "Add" };
        format!("{verb} {}", self.kind.noun())
    }

    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        match &self.body {
            FormBody::Student { .. } => StudentField::ALL.len(),
            FormBody::Course { .. } => CourseField::ALL.len(),
            FormBody::Enrollment { .. } => EnrollmentField::ALL.len(),
        }
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        match &self.body {
            FormBody::Student { errors, .. } => errors.len(),
            FormBody::Course { errors, .. } => errors.len(),
            FormBody::Enrollment { errors, .. } => errors.len(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.field_count();
    }

    pub fn focus_prev(&mut self) {
        let count = self.field_count();
        self.focus = (self.focus + count - 1) % count;
    }

    /// The text field under focus, or `None` when focus is on a choice.
    pub fn focused_input_mut(&mut self) -> Option<&mut DraftInput> {
        match &mut self.body {
            FormBody::Student { inputs, .. } | FormBody::Course { inputs, .. } => {
                inputs.get_mut(self.focus)
            }
            FormBody::Enrollment { .. } => None,
        }
    }

    /// Move the focused choice one option forward or back, wrapping.
    ///
    /// Student and course choices cycle through "nothing selected" followed
    /// by the store's entities in order.
    pub fn cycle_choice(&mut self, store: &EntityStore, forward: bool) {
        let FormBody::Enrollment { draft, .. } = &mut self.body else {
            return;
        };
        match EnrollmentField::ALL.get(self.focus) {
            Some(EnrollmentField::Student) => {
                let ids: Vec<StudentId> = store.students().iter().map(Student::id).collect();
                draft.student = cycle_option(&ids, draft.student, forward);
            }
            Some(EnrollmentField::Course) => {
                let ids: Vec<CourseId> = store.courses().iter().map(Course::id).collect();
                draft.course = cycle_option(&ids, draft.course, forward);
            }
            Some(EnrollmentField::Status) => draft.status = draft.status.toggled(),
            None => {}
        }
    }

    #[must_use]
    pub fn student_draft(&self) -> Option<StudentDraft> {
        let FormBody::Student { inputs, .. } = &self.body else {
            return None;
        };
        let text = |field: StudentField| {
            inputs
                .get(field.index())
                .map(|input| input.text().to_string())
                .unwrap_or_default()
        };
        Some(StudentDraft {
            first_name: text(StudentField::FirstName),
            last_name: text(StudentField::LastName),
            email: text(StudentField::Email),
            phone: text(StudentField::Phone),
            birth_date: text(StudentField::BirthDate),
            profile_url: text(StudentField::ProfileUrl),
        })
    }

    #[must_use]
    pub fn course_draft(&self) -> Option<CourseDraft> {
        let FormBody::Course { inputs, .. } = &self.body else {
            return None;
        };
        let text = |field: CourseField| {
            inputs
                .get(field.index())
                .map(|input| input.text().to_string())
                .unwrap_or_default()
        };
        Some(CourseDraft {
            name: text(CourseField::Name),
            description: text(CourseField::Description),
            duration_hours: text(CourseField::DurationHours),
        })
    }

    #[must_use]
    pub fn enrollment_draft(&self) -> Option<EnrollmentDraft> {
        match &self.body {
            FormBody::Enrollment { draft, .. } => Some(*draft),
            _ => None,
        }
    }

    /// Run the validator for this form's kind.
    ///
    /// On failure the errors are kept for display and their count returned.
    /// On success any previous errors are cleared.
    pub(crate) fn validate(&mut self, store: &EntityStore) -> Result<ValidEntity, usize> {
        let outcome = match &self.body {
            FormBody::Student { .. } => {
                let draft = self.student_draft().unwrap_or_default();
                validate_student(&draft)
                    .map(ValidEntity::Student)
                    .map_err(FormErrors::Student)
            }
            FormBody::Course { .. } => {
                let draft = self.course_draft().unwrap_or_default();
                validate_course(&draft)
                    .map(ValidEntity::Course)
                    .map_err(FormErrors::Course)
            }
            FormBody::Enrollment { .. } => {
                let draft = self.enrollment_draft().unwrap_or_default();
                validate_enrollment(&draft, store)
                    .map(ValidEntity::Enrollment)
                    .map_err(FormErrors::Enrollment)
            }
        };

        match outcome {
            Ok(valid) => {
                self.store_errors(FormErrors::None);
                Ok(valid)
            }
            Err(errors) => {
                let count = errors.len();
                self.store_errors(errors);
                Err(count)
            }
        }
    }

    fn store_errors(&mut self, new: FormErrors) {
        match (&mut self.body, new) {
            (FormBody::Student { errors, .. }, FormErrors::Student(new)) => *errors = new,
            (FormBody::Course { errors, .. }, FormErrors::Course(new)) => *errors = new,
            (FormBody::Enrollment { errors, .. }, FormErrors::Enrollment(new)) => *errors = new,
            (FormBody::Student { errors, .. }, _) => *errors = FieldErrors::new(),
            (FormBody::Course { errors, .. }, _) => *errors = FieldErrors::new(),
            (FormBody::Enrollment { errors, .. }, _) => *errors = FieldErrors::new(),
        }
    }

    /// Rows for rendering, in form order.
    #[must_use]
    pub fn rows<'a>(&'a self, store: &EntityStore) -> Vec<FormRow<'a>> {
        match &self.body {
            FormBody::Student { inputs, errors } => {
                text_rows(StudentField::ALL, inputs, errors, self.focus)
            }
            FormBody::Course { inputs, errors } => {
                text_rows(CourseField::ALL, inputs, errors, self.focus)
            }
            FormBody::Enrollment { draft, errors } => EnrollmentField::ALL
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let (value, placeholder) = choice_value(*field, draft, store);
                    FormRow {
                        label: field.label(),
                        value,
                        placeholder,
                        kind: FormRowKind::Choice,
                        focused: i == self.focus,
                        error: errors.get(*field),
                    }
                })
                .collect(),
        }
    }
}

enum FormErrors {
    None,
    Student(FieldErrors<StudentField>),
    Course(FieldErrors<CourseField>),
    Enrollment(FieldErrors<EnrollmentField>),
}

impl FormErrors {
    fn len(&self) -> usize {
        match self {
            FormErrors::None => 0,
            FormErrors::Student(errors) => errors.len(),
            FormErrors::Course(errors) => errors.len(),
            FormErrors::Enrollment(errors) => errors.len(),
        }
    }
}

fn text_rows<'a, F: FormField>(
    fields: &'static [F],
    inputs: &'a [DraftInput],
    errors: &'a FieldErrors<F>,
    focus: usize,
) -> Vec<FormRow<'a>> {
    fields
        .iter()
        .zip(inputs)
        .enumerate()
        .map(|(i, (field, input))| {
            let focused = i == focus;
            FormRow {
                label: field.label(),
                value: input.text().to_string(),
                placeholder: false,
                kind: FormRowKind::Text {
                    caret: focused.then_some(input.cursor()),
                },
                focused,
                error: errors.get(*field),
            }
        })
        .collect()
}

fn choice_value(
    field: EnrollmentField,
    draft: &EnrollmentDraft,
    store: &EntityStore,
) -> (String, bool) {
    match field {
        EnrollmentField::Student => match draft.student {
            Some(id) => store
                .student(id)
                .map_or_else(|| (format!("(missing {id})"), false), |s| (s.full_name(), false)),
            None => ("Select a student".to_string(), true),
        },
        EnrollmentField::Course => match draft.course {
            Some(id) => store
                .course(id)
                .map_or_else(|| (format!("(missing {id})"), false), |c| (c.name.clone(), false)),
            None => ("Select a course".to_string(), true),
        },
        EnrollmentField::Status => (draft.status.label().to_string(), false),
    }
}

/// Step through `[None, Some(ids[0]), Some(ids[1]), ...]`, wrapping.
fn cycle_option<T: Copy + PartialEq>(ids: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = ids.len() + 1;
    let pos = current
        .and_then(|cur| ids.iter().position(|id| *id == cur))
        .map_or(0, |i| i + 1);
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    next.checked_sub(1).map(|i| ids[i])
}
