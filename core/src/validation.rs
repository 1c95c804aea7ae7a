//! Form validation.
//!
//! Each validator checks every field of a draft and either returns the value
//! the store accepts or the full set of field errors. Nothing here mutates.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use roster_types::{
    CourseDraft, CourseField, DATE_FORMAT, EnrollmentDraft, EnrollmentField, FormField, NewCourse,
    NewEnrollment, NewStudent, StudentDraft, StudentField,
};

use crate::store::EntityStore;

/// `local@domain.tld`, each part free of whitespace. Unanchored, so it only
/// has to occur somewhere in the value.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Messages keyed by the field they belong to. Empty means valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: FormField> {
    errors: BTreeMap<F, String>,
}

impl<F: FormField> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: FormField> FieldErrors<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message recorded wins.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Fields with errors, in form order.
    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate a student draft.
///
/// Every field is required. The email must look like `local@domain.tld` and
/// the birth date must be a real `YYYY-MM-DD` date.
pub fn validate_student(draft: &StudentDraft) -> Result<NewStudent, FieldErrors<StudentField>> {
    let mut errors = FieldErrors::new();

    if is_blank(&draft.first_name) {
        errors.insert(StudentField::FirstName, "First name is required");
    }
    if is_blank(&draft.last_name) {
        errors.insert(StudentField::LastName, "Last name is required");
    }
    if is_blank(&draft.email) {
        errors.insert(StudentField::Email, "Email is required");
    } else if !EMAIL_SHAPE.is_match(&draft.email) {
        errors.insert(StudentField::Email, "Invalid email");
    }
    if is_blank(&draft.phone) {
        errors.insert(StudentField::Phone, "Phone is required");
    }
    let birth_date = if is_blank(&draft.birth_date) {
        errors.insert(StudentField::BirthDate, "Birth date is required");
        None
    } else {
        match NaiveDate::parse_from_str(draft.birth_date.trim(), DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.insert(StudentField::BirthDate, "Birth date must be YYYY-MM-DD");
                None
            }
        }
    };
    if is_blank(&draft.profile_url) {
        errors.insert(StudentField::ProfileUrl, "Profile URL is required");
    }

    match birth_date {
        Some(birth_date) => errors.into_result(|| NewStudent {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            birth_date,
            profile_url: draft.profile_url.clone(),
        }),
        None => Err(errors),
    }
}

/// Validate a course draft.
///
/// Name and description are required; the duration must be an integer.
/// Zero and negative durations are accepted.
pub fn validate_course(draft: &CourseDraft) -> Result<NewCourse, FieldErrors<CourseField>> {
    let mut errors = FieldErrors::new();

    if is_blank(&draft.name) {
        errors.insert(CourseField::Name, "Course name is required");
    }
    if is_blank(&draft.description) {
        errors.insert(CourseField::Description, "Description is required");
    }
    let duration = if is_blank(&draft.duration_hours) {
        errors.insert(CourseField::DurationHours, "Duration is required");
        None
    } else {
        match draft.duration_hours.trim().parse::<i64>() {
            Ok(hours) => Some(hours),
            Err(_) => {
                errors.insert(CourseField::DurationHours, "Duration must be a whole number");
                None
            }
        }
    };

    match duration {
        Some(duration_hours) => errors.into_result(|| NewCourse {
            name: draft.name.clone(),
            description: draft.description.clone(),
            duration_hours,
        }),
        None => Err(errors),
    }
}

/// Validate an enrollment draft against the current store.
///
/// Both selections are required and must refer to entities that exist right
/// now. The status comes from a fixed list and is not checked.
pub fn validate_enrollment(
    draft: &EnrollmentDraft,
    store: &EntityStore,
) -> Result<NewEnrollment, FieldErrors<EnrollmentField>> {
    let mut errors = FieldErrors::new();

    let student = match draft.student {
        None => {
            errors.insert(EnrollmentField::Student, "Select a student");
            None
        }
        Some(id) if store.student(id).is_none() => {
            errors.insert(EnrollmentField::Student, "Selected student no longer exists");
            None
        }
        Some(id) => Some(id),
    };
    let course = match draft.course {
        None => {
            errors.insert(EnrollmentField::Course, "Select a course");
            None
        }
        Some(id) if store.course(id).is_none() => {
            errors.insert(EnrollmentField::Course, "Selected course no longer exists");
            None
        }
        Some(id) => Some(id),
    };

    match (student, course) {
        (Some(student), Some(course)) => Ok(NewEnrollment {
            student,
            course,
            status: draft.status,
        }),
        _ => Err(errors),
    }
}
