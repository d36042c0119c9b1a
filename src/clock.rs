use chrono::{Local, NaiveDateTime};

use tally_core::Clock;

/// Real-time clock backed by the machine's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
