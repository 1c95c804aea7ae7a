//! Stored records for the three collections.
//!
//! Entities are only built from validated `New*` values; identifiers are
//! assigned by the store and cannot be changed afterwards.

use chrono::NaiveDate;

use crate::ids::{CourseId, EnrollmentId, StudentId};
use crate::input::{
    CoursePatch, EnrollmentPatch, NewCourse, NewEnrollment, NewStudent, StudentPatch,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    /// Reference to the profile image, kept verbatim.
    pub profile_url: String,
}

impl Student {
    #[must_use]
    pub fn new(id: StudentId, new: NewStudent) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            birth_date: new.birth_date,
            profile_url: new.profile_url,
        }
    }

    #[must_use]
    pub fn id(&self) -> StudentId {
        self.id
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Shallow merge: only fields present in `patch` are replaced.
    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(profile_url) = patch.profile_url {
            self.profile_url = profile_url;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    pub name: String,
    pub description: String,
    pub duration_hours: i64,
}

impl Course {
    #[must_use]
    pub fn new(id: CourseId, new: NewCourse) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            duration_hours: new.duration_hours,
        }
    }

    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn apply(&mut self, patch: CoursePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(duration_hours) = patch.duration_hours {
            self.duration_hours = duration_hours;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Inactive,
}

impl EnrollmentStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    id: EnrollmentId,
    pub student: StudentId,
    pub course: CourseId,
    registered_on: NaiveDate,
    pub status: EnrollmentStatus,
}

impl Enrollment {
    #[must_use]
    pub fn new(id: EnrollmentId, new: NewEnrollment, registered_on: NaiveDate) -> Self {
        Self {
            id,
            student: new.student,
            course: new.course,
            registered_on,
            status: new.status,
        }
    }

    #[must_use]
    pub fn id(&self) -> EnrollmentId {
        self.id
    }

    /// Date the enrollment was created. Never changes after creation.
    #[must_use]
    pub fn registered_on(&self) -> NaiveDate {
        self.registered_on
    }

    pub fn apply(&mut self, patch: EnrollmentPatch) {
        if let Some(student) = patch.student {
            self.student = student;
        }
        if let Some(course) = patch.course {
            self.course = course;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}
