//! Injected time source.
//!
//! The store and statistics engine never read the system clock directly;
//! they go through a [`Clock`] so tests can pin "today" to a fixed date.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Supplies the current calendar date and timestamp.
pub trait Clock: Send + Sync {
    /// Returns today's calendar date in the caller's local timezone.
    fn today(&self) -> NaiveDate;

    /// Returns the current timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed date and timestamp, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    /// The date returned by `today()`.
    pub date: NaiveDate,
    /// The timestamp returned by `now()`.
    pub timestamp: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a fixed clock at midnight UTC on the given date.
    #[must_use]
    pub fn at(date: NaiveDate) -> Self {
        Self {
            date,
            timestamp: date.and_hms_opt(0, 0, 0).map_or_else(Utc::now, |dt| {
                DateTime::from_naive_utc_and_offset(dt, Utc)
            }),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }

    fn now(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
