//! Values flowing into the store.
//!
//! - Drafts: what a form currently holds. Every field exists, any may be empty.
//! - `New*`: a draft that passed validation. Only validators construct these
//!   in application code.
//! - Patches: partial updates. `None` leaves the stored field untouched.

use chrono::NaiveDate;

use crate::entity::{Course, Enrollment, EnrollmentStatus, Student};
use crate::ids::{CourseId, StudentId};

/// Birth date format used by drafts and table cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Students
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub profile_url: String,
}

impl StudentDraft {
    #[must_use]
    pub fn from_student(student: &Student) -> Self {
        Self {
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            birth_date: student.birth_date.format(DATE_FORMAT).to_string(),
            profile_url: student.profile_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub profile_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub profile_url: Option<String>,
}

impl From<NewStudent> for StudentPatch {
    fn from(new: NewStudent) -> Self {
        Self {
            first_name: Some(new.first_name),
            last_name: Some(new.last_name),
            email: Some(new.email),
            phone: Some(new.phone),
            birth_date: Some(new.birth_date),
            profile_url: Some(new.profile_url),
        }
    }
}

// ============================================================================
// Courses
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub name: String,
    pub description: String,
    pub duration_hours: String,
}

impl CourseDraft {
    #[must_use]
    pub fn from_course(course: &Course) -> Self {
        Self {
            name: course.name.clone(),
            description: course.description.clone(),
            duration_hours: course.duration_hours.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub description: String,
    pub duration_hours: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_hours: Option<i64>,
}

impl From<NewCourse> for CoursePatch {
    fn from(new: NewCourse) -> Self {
        Self {
            name: Some(new.name),
            description: Some(new.description),
            duration_hours: Some(new.duration_hours),
        }
    }
}

// ============================================================================
// Enrollments
// ============================================================================

/// Selections made in the enrollment form. `None` means "nothing selected".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrollmentDraft {
    pub student: Option<StudentId>,
    pub course: Option<CourseId>,
    pub status: EnrollmentStatus,
}

impl EnrollmentDraft {
    #[must_use]
    pub fn from_enrollment(enrollment: &Enrollment) -> Self {
        Self {
            student: Some(enrollment.student),
            course: Some(enrollment.course),
            status: enrollment.status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student: StudentId,
    pub course: CourseId,
    pub status: EnrollmentStatus,
}

/// Registration date is fixed at creation and has no patch field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrollmentPatch {
    pub student: Option<StudentId>,
    pub course: Option<CourseId>,
    pub status: Option<EnrollmentStatus>,
}

impl From<NewEnrollment> for EnrollmentPatch {
    fn from(new: NewEnrollment) -> Self {
        Self {
            student: Some(new.student),
            course: Some(new.course),
            status: Some(new.status),
        }
    }
}
