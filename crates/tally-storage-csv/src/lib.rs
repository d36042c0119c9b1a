//! tally-storage-csv
//!
//! One append-only CSV file per tenant ledger. Reads are tolerant: rows that
//! cannot be understood are skipped, never reported as errors.

use std::{
    fs::{self, File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use csv::{ByteRecord, ReaderBuilder, Terminator, WriterBuilder};
use tally_core::{storage::LedgerStorage, CoreError};
use tally_domain::{Entry, DATE_FORMAT};

/// Column names written as the first line of every ledger file.
pub const LEDGER_HEADER: [&str; 4] = ["date", "time", "income", "note"];
const LEDGER_EXTENSION: &str = "csv";

/// Filesystem-backed CSV persistence for tenant ledgers.
#[derive(Debug, Clone)]
pub struct CsvLedgerStorage {
    root: PathBuf,
}

impl CsvLedgerStorage {
    /// Opens (and creates if needed) the directory holding ledger files.
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(name), LEDGER_EXTENSION))
    }
}

impl LedgerStorage for CsvLedgerStorage {
    fn ensure(&self, ledger: &str) -> Result<(), CoreError> {
        let path = self.ledger_path(ledger);
        if path.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.root)?;
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            // Lost a creation race; the other writer produced the header.
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        let mut writer = ledger_writer(file);
        writer.write_record(LEDGER_HEADER).map_err(csv_error)?;
        writer.flush()?;
        tracing::debug!(ledger, path = %path.display(), "created ledger file");
        Ok(())
    }

    fn read_all(&self, ledger: &str) -> Result<Vec<Entry>, CoreError> {
        self.ensure(ledger)?;
        let path = self.ledger_path(ledger);
        let file = File::open(&path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let columns = reader
            .byte_headers()
            .map(Columns::from_headers)
            .unwrap_or_default();

        let mut entries = Vec::new();
        let mut skipped = 0usize;
        for record in reader.byte_records() {
            match record.ok().and_then(|row| columns.parse(&row)) {
                Some(entry) => entries.push(entry),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::debug!(ledger, skipped, "skipped malformed ledger rows");
        }
        Ok(entries)
    }

    fn append(&self, ledger: &str, entry: &Entry) -> Result<(), CoreError> {
        self.ensure(ledger)?;
        let path = self.ledger_path(ledger);
        let mut file = OpenOptions::new().read(true).append(true).open(&path)?;
        if !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }
        let mut writer = ledger_writer(file);
        writer
            .write_record([
                entry.date_label(),
                entry.time.clone().unwrap_or_default(),
                format_income(entry.income),
                entry.note.clone(),
            ])
            .map_err(csv_error)?;
        writer.flush()?;
        tracing::debug!(ledger, date = %entry.date, income = entry.income, "appended entry");
        Ok(())
    }

    fn storage_key(&self, ledger: &str) -> String {
        canonical_name(ledger)
    }
}

/// Fixed two-decimal representation used for the income column.
pub fn format_income(income: f64) -> String {
    format!("{income:.2}")
}

/// Positions of the ledger columns inside a record.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    time: usize,
    income: usize,
    note: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            date: 0,
            time: 1,
            income: 2,
            note: 3,
        }
    }
}

impl Columns {
    fn from_headers(headers: &ByteRecord) -> Self {
        let find = |name: &str, fallback: usize| {
            headers
                .iter()
                .position(|field| {
                    std::str::from_utf8(field)
                        .map(|value| value.trim().eq_ignore_ascii_case(name))
                        .unwrap_or(false)
                })
                .unwrap_or(fallback)
        };
        let defaults = Self::default();
        Self {
            date: find("date", defaults.date),
            time: find("time", defaults.time),
            income: find("income", defaults.income),
            note: find("note", defaults.note),
        }
    }

    fn parse(&self, row: &ByteRecord) -> Option<Entry> {
        let date = NaiveDate::parse_from_str(field(row, self.date)?, DATE_FORMAT).ok()?;
        let income_raw = field(row, self.income)?;
        let income = if income_raw.is_empty() {
            0.0
        } else {
            income_raw.parse::<f64>().ok().filter(|value| value.is_finite())?
        };
        let time = Some(field(row, self.time)?.to_string());
        let note = field(row, self.note)?;
        Some(Entry::new(date, time, income, note))
    }
}

/// Trimmed UTF-8 text of a cell. Missing cells read as empty; invalid UTF-8 as `None`.
fn field(row: &ByteRecord, index: usize) -> Option<&str> {
    match row.get(index) {
        Some(raw) => std::str::from_utf8(raw).ok().map(str::trim),
        None => Some(""),
    }
}

fn ledger_writer(file: File) -> csv::Writer<File> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file)
}

fn ends_with_newline(file: &mut File) -> Result<bool, CoreError> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn csv_error(err: csv::Error) -> CoreError {
    CoreError::Storage(format!("CSV write error: {err}"))
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_sanitizes() {
        assert_eq!(canonical_name("Cafe One"), "cafe_one");
        assert_eq!(canonical_name("../etc"), "___etc");
        assert_eq!(canonical_name("  "), "ledger");
    }

    #[test]
    fn income_has_two_decimals() {
        assert_eq!(format_income(12.0), "12.00");
        assert_eq!(format_income(3.456), "3.46");
    }

    #[test]
    fn columns_follow_header_order() {
        let headers = ByteRecord::from(vec!["income", "note", "date", "time"]);
        let columns = Columns::from_headers(&headers);
        let row = ByteRecord::from(vec!["9.5", "tips", "2024-01-02", "10:00"]);
        let entry = columns.parse(&row).expect("entry");
        assert_eq!(entry.income, 9.5);
        assert_eq!(entry.note, "tips");
        assert_eq!(entry.hour(), Some(10));
    }
}
