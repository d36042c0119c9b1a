//! Ledger entries and the aggregates derived from them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar format used for the `date` column of a ledger.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wall-clock format used for the `time` column of a ledger.
pub const TIME_FORMAT: &str = "%H:%M";

/// Summed income per calendar date. Dates without entries are absent.
pub type DailyTotals = BTreeMap<NaiveDate, f64>;

/// A single income record in a tenant ledger.
///
/// Entries are immutable once appended; their identity is their position in
/// the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub date: NaiveDate,
    /// `HH:MM` in tenant-local time. Legacy rows may carry no time at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub income: f64,
    #[serde(default)]
    pub note: String,
}

impl Entry {
    pub fn new(
        date: NaiveDate,
        time: Option<String>,
        income: f64,
        note: impl Into<String>,
    ) -> Self {
        let time = time
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self {
            date,
            time,
            income,
            note: note.into(),
        }
    }

    /// Hour component of the recorded time, if the time is present and numeric.
    pub fn hour(&self) -> Option<u32> {
        let raw = self.time.as_deref()?;
        raw.split(':').next()?.trim().parse().ok()
    }

    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    /// Date rendered in the ledger's on-disk format.
    pub fn date_label(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn blank_time_is_normalized_to_none() {
        let entry = Entry::new(day(), Some("  ".into()), 5.0, "");
        assert!(entry.time.is_none());
        assert_eq!(entry.hour(), None);
    }

    #[test]
    fn hour_reads_leading_component() {
        let entry = Entry::new(day(), Some("09:45".into()), 5.0, "");
        assert_eq!(entry.hour(), Some(9));

        let bare = Entry::new(day(), Some("17".into()), 5.0, "");
        assert_eq!(bare.hour(), Some(17));
    }

    #[test]
    fn garbage_time_has_no_hour() {
        let entry = Entry::new(day(), Some("noon".into()), 5.0, "");
        assert!(entry.has_time());
        assert_eq!(entry.hour(), None);
    }

    #[test]
    fn date_label_uses_iso_format() {
        let entry = Entry::new(day(), None, 1.0, "");
        assert_eq!(entry.date_label(), "2024-03-01");
    }
}
