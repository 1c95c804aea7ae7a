//! In-memory entity store.
//!
//! Three ordered collections with per-collection id sequences. Collections
//! keep insertion order; nothing is ever sorted.
//!
//! Update and remove on an unknown id are no-ops. Callers learn about it from
//! the return value (`false` / `None`), never from an error.

use std::mem;

use tracing::debug;

use roster_types::{
    Course, CourseId, CoursePatch, Enrollment, EnrollmentId, EnrollmentPatch, IdSequence,
    NewCourse, NewEnrollment, NewStudent, Student, StudentId, StudentPatch,
};

use crate::clock::{Clock, SystemClock};

/// An entity taken out of the store, along with any enrollments that were
/// removed because they referenced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed<T> {
    pub entity: T,
    pub cascaded: Vec<Enrollment>,
}

/// Display names resolved for one enrollment.
///
/// `None` only if the referenced entity is gone, which the delete cascade
/// prevents for store-created enrollments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentNames<'a> {
    pub student: Option<&'a Student>,
    pub course: Option<&'a Course>,
}

#[derive(Debug)]
pub struct EntityStore {
    students: Vec<Student>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    student_ids: IdSequence,
    course_ids: IdSequence,
    enrollment_ids: IdSequence,
    clock: Box<dyn Clock>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl EntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            students: Vec::new(),
            courses: Vec::new(),
            enrollments: Vec::new(),
            student_ids: IdSequence::new(),
            course_ids: IdSequence::new(),
            enrollment_ids: IdSequence::new(),
            clock: Box::new(clock),
        }
    }

    // ------------------------------------------------------------------------
    // Students
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    #[must_use]
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    pub fn add_student(&mut self, new: NewStudent) -> StudentId {
        let id = StudentId::new(self.student_ids.next_raw());
        self.students.push(Student::new(id, new));
        debug!(%id, "student added");
        id
    }

    pub fn update_student(&mut self, id: StudentId, patch: StudentPatch) -> bool {
        match self.students.iter_mut().find(|s| s.id() == id) {
            Some(student) => {
                student.apply(patch);
                debug!(%id, "student updated");
                true
            }
            None => {
                debug!(%id, "update ignored: no such student");
                false
            }
        }
    }

    /// Remove a student and every enrollment that references it.
    pub fn remove_student(&mut self, id: StudentId) -> Option<Removed<Student>> {
        let Some(pos) = self.students.iter().position(|s| s.id() == id) else {
            debug!(%id, "remove ignored: no such student");
            return None;
        };
        let entity = self.students.remove(pos);
        let cascaded = self.drain_enrollments(|e| e.student == id);
        debug!(%id, cascaded = cascaded.len(), "student removed");
        Some(Removed { entity, cascaded })
    }

    // ------------------------------------------------------------------------
    // Courses
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == id)
    }

    pub fn add_course(&mut self, new: NewCourse) -> CourseId {
        let id = CourseId::new(self.course_ids.next_raw());
        self.courses.push(Course::new(id, new));
        debug!(%id, "course added");
        id
    }

    pub fn update_course(&mut self, id: CourseId, patch: CoursePatch) -> bool {
        match self.courses.iter_mut().find(|c| c.id() == id) {
            Some(course) => {
                course.apply(patch);
                debug!(%id, "course updated");
                true
            }
            None => {
                debug!(%id, "update ignored: no such course");
                false
            }
        }
    }

    /// Remove a course and every enrollment that references it.
    pub fn remove_course(&mut self, id: CourseId) -> Option<Removed<Course>> {
        let Some(pos) = self.courses.iter().position(|c| c.id() == id) else {
            debug!(%id, "remove ignored: no such course");
            return None;
        };
        let entity = self.courses.remove(pos);
        let cascaded = self.drain_enrollments(|e| e.course == id);
        debug!(%id, cascaded = cascaded.len(), "course removed");
        Some(Removed { entity, cascaded })
    }

    // ------------------------------------------------------------------------
    // Enrollments
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    #[must_use]
    pub fn enrollment(&self, id: EnrollmentId) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.id() == id)
    }

    /// Create an enrollment registered today.
    ///
    /// The caller is expected to have validated that both references exist.
    pub fn add_enrollment(&mut self, new: NewEnrollment) -> EnrollmentId {
        let id = EnrollmentId::new(self.enrollment_ids.next_raw());
        let today = self.clock.today();
        self.enrollments.push(Enrollment::new(id, new, today));
        debug!(%id, student = %new.student, course = %new.course, "enrollment added");
        id
    }

    pub fn update_enrollment(&mut self, id: EnrollmentId, patch: EnrollmentPatch) -> bool {
        match self.enrollments.iter_mut().find(|e| e.id() == id) {
            Some(enrollment) => {
                enrollment.apply(patch);
                debug!(%id, "enrollment updated");
                true
            }
            None => {
                debug!(%id, "update ignored: no such enrollment");
                false
            }
        }
    }

    pub fn remove_enrollment(&mut self, id: EnrollmentId) -> Option<Removed<Enrollment>> {
        let Some(pos) = self.enrollments.iter().position(|e| e.id() == id) else {
            debug!(%id, "remove ignored: no such enrollment");
            return None;
        };
        let entity = self.enrollments.remove(pos);
        debug!(%id, "enrollment removed");
        Some(Removed {
            entity,
            cascaded: Vec::new(),
        })
    }

    #[must_use]
    pub fn enrollment_names(&self, enrollment: &Enrollment) -> EnrollmentNames<'_> {
        EnrollmentNames {
            student: self.student(enrollment.student),
            course: self.course(enrollment.course),
        }
    }

    fn drain_enrollments(&mut self, mut pred: impl FnMut(&Enrollment) -> bool) -> Vec<Enrollment> {
        let (removed, kept): (Vec<_>, Vec<_>) = mem::take(&mut self.enrollments)
            .into_iter()
            .partition(|e| pred(e));
        self.enrollments = kept;
        removed
    }
}
