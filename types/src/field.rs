//! Form field identifiers.
//!
//! Validation errors and form focus are keyed by these enums.

use std::fmt::Debug;

/// A field that appears in one of the entity forms.
pub trait FormField: Copy + Ord + Debug + 'static {
    /// Every field, in form order.
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    /// Position of the field in [`FormField::ALL`].
    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StudentField {
    FirstName,
    LastName,
    Email,
    Phone,
    BirthDate,
    ProfileUrl,
}

impl FormField for StudentField {
    const ALL: &'static [Self] = &[
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::BirthDate,
        Self::ProfileUrl,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::BirthDate => "Birth date",
            Self::ProfileUrl => "Profile URL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CourseField {
    Name,
    Description,
    DurationHours,
}

impl FormField for CourseField {
    const ALL: &'static [Self] = &[Self::Name, Self::Description, Self::DurationHours];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Course name",
            Self::Description => "Description",
            Self::DurationHours => "Duration (hours)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnrollmentField {
    Student,
    Course,
    Status,
}

impl FormField for EnrollmentField {
    const ALL: &'static [Self] = &[Self::Student, Self::Course, Self::Status];

    fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Course => "Course",
            Self::Status => "Status",
        }
    }
}
