//! Core domain types for Roster.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod entity;
mod field;
mod ids;
mod input;
mod sanitize;
pub mod ui;

pub use entity::{Course, Enrollment, EnrollmentStatus, Student};
pub use field::{CourseField, EnrollmentField, FormField, StudentField};
pub use ids::{CourseId, EnrollmentId, IdSequence, StudentId};
pub use input::{
    CourseDraft, CoursePatch, DATE_FORMAT, EnrollmentDraft, EnrollmentPatch, NewCourse,
    NewEnrollment, NewStudent, StudentDraft, StudentPatch,
};
pub use sanitize::sanitize_cell_text;
