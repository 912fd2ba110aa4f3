use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, Utc};

/// Source of "today" and "now".
///
/// Calendar dates come from the user's local timezone — the rollover
/// boundary is the user's midnight, not UTC's.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in the local timezone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests and simulations.
pub struct ManualClock {
    today: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn starting_at(date: NaiveDate) -> Self {
        Self {
            today: Mutex::new(date),
        }
    }

    pub fn set_today(&self, date: NaiveDate) {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner) = date;
    }

    /// Move the calendar forward.
    pub fn advance_days(&self, days: u64) {
        let mut guard = self.today.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = guard.checked_add_days(Days::new(days)) {
            *guard = next;
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> DateTime<Utc> {
        let date = self.today();
        DateTime::from_naive_utc_and_offset(date.and_time(NaiveTime::default()), Utc)
    }
}
