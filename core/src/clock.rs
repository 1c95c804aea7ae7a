//! Source of "today" for enrollment registration dates.

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

use chrono::{Days, Local, NaiveDate};

pub trait Clock: Debug {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same date, so a test can keep a handle after giving one
/// to the store.
#[derive(Debug, Clone)]
pub struct ManualClock {
    date: Rc<Cell<NaiveDate>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Rc::new(Cell::new(date)),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    pub fn advance_days(&self, days: u64) {
        let current = self.date.get();
        self.date
            .set(current.checked_add_days(Days::new(days)).unwrap_or(current));
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}
