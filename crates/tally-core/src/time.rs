use chrono::{NaiveDate, NaiveDateTime};

use tally_domain::TIME_FORMAT;

/// Clock abstracts access to the tenant-local wall clock so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local timestamp.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Returns the current time of day formatted as `HH:MM`.
    fn time_of_day(&self) -> String {
        self.now().format(TIME_FORMAT).to_string()
    }
}

/// A clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
