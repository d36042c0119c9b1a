//! Validation of raw entry input coming from the presentation layer.

use tally_domain::Entry;

use crate::{time::Clock, CoreError};

pub struct EntryService;

impl EntryService {
    /// Parses a user-typed amount. Rejects anything that is not a finite,
    /// non-negative number.
    pub fn parse_income(raw: &str) -> Result<f64, CoreError> {
        let trimmed = raw.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| CoreError::InvalidInput(format!("income `{trimmed}` is not a number")))?;
        if !value.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "income `{trimmed}` is not a finite amount"
            )));
        }
        if value < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "income `{trimmed}` must not be negative"
            )));
        }
        Ok(value)
    }

    /// Builds a new entry stamped with the clock's current date and time.
    pub fn compose(clock: &dyn Clock, raw_income: &str, raw_note: &str) -> Result<Entry, CoreError> {
        let income = Self::parse_income(raw_income)?;
        Ok(Entry::new(
            clock.today(),
            Some(clock.time_of_day()),
            income,
            raw_note.trim(),
        ))
    }
}
