//! Core domain logic for Roster.
//!
//! The entity store with its delete cascade, the form validators, and the
//! clock that dates new enrollments.

mod clock;
mod store;
mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{EnrollmentNames, EntityStore, Removed};
pub use validation::{FieldErrors, validate_course, validate_enrollment, validate_student};
