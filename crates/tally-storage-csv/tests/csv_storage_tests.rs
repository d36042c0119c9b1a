use std::fs;

use chrono::NaiveDate;
use tally_core::{storage::LedgerStorage, CoreError};
use tally_domain::Entry;
use tally_storage_csv::CsvLedgerStorage;
use tempfile::tempdir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

#[test]
fn ensure_creates_header_only_file() {
    let dir = tempdir().expect("tempdir");
    let storage = CsvLedgerStorage::new(dir.path().join("data")).expect("create storage");

    storage.ensure("cafe1").expect("ensure");

    let path = storage.ledger_path("cafe1");
    assert_eq!(fs::read_to_string(&path).unwrap(), "date,time,income,note\n");
    assert!(storage.read_all("cafe1").unwrap().is_empty());
}

#[test]
fn ensure_is_idempotent_and_never_truncates() {
    let dir = tempdir().expect("tempdir");
    let storage = CsvLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");

    storage.ensure("cafe1").unwrap();
    storage
        .append("cafe1", &Entry::new(day(1), Some("09:00".into()), 10.0, ""))
        .unwrap();
    let before = fs::read_to_string(storage.ledger_path("cafe1")).unwrap();

    storage.ensure("cafe1").unwrap();
    storage.ensure("cafe1").unwrap();

    let after = fs::read_to_string(storage.ledger_path("cafe1")).unwrap();
    assert_eq!(before, after);
    assert_eq!(storage.read_all("cafe1").unwrap().len(), 1);
}

#[test]
fn append_then_read_round_trips_last_entry() {
    let dir = tempdir().expect("tempdir");
    let storage = CsvLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");

    storage
        .append("cafe1", &Entry::new(day(1), Some("08:30".into()), 5.0, "first"))
        .unwrap();
    let entry = Entry::new(day(2), Some("19:45".into()), 12.346, "espresso, cake \"combo\"");
    storage.append("cafe1", &entry).unwrap();

    let entries = storage.read_all("cafe1").unwrap();
    assert_eq!(entries.len(), 2);
    let last = entries.last().unwrap();
    assert_eq!(last.date, day(2));
    assert_eq!(last.time.as_deref(), Some("19:45"));
    assert_eq!(last.income, 12.35);
    assert_eq!(last.note, "espresso, cake \"combo\"");

    let raw = fs::read_to_string(storage.ledger_path("cafe1")).unwrap();
    assert!(raw.contains(",12.35,"));
}

#[test]
fn duplicate_timestamps_are_allowed() {
    let dir = tempdir().expect("tempdir");
    let storage = CsvLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");
    let entry = Entry::new(day(3), Some("10:00".into()), 1.0, "");

    storage.append("dup", &entry).unwrap();
    storage.append("dup", &entry).unwrap();

    assert_eq!(storage.read_all("dup").unwrap().len(), 2);
}

#[test]
fn malformed_rows_are_dropped_silently() {
    let dir = tempdir().expect("tempdir");
    let storage = CsvLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");
    let path = storage.ledger_path("legacy");
    fs::write(
        &path,
        "date,time,income,note\n\
         2024-06-01,09:00,15.50,good\n\
         2024-06-01,10:00,abc,bad income\n\
         ,11:00,3.00,missing date\n\
         not-a-date,12:00,3.00,bad date\n\
         2024-06-02,,,\n\
         2024-06-03,13:00,inf,infinite\n",
    )
    .unwrap();

    let entries = storage.read_all("legacy").unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].income, 15.5);
    assert_eq!(entries[0].note, "good");
    assert_eq!(entries[1].date, day(2));
    assert_eq!(entries[1].income, 0.0);
    assert!(entries[1].time.is_none());
}

#[test]
fn one_good_and_one_bad_row_yield_only_the_good_row() {
    let dir = tempdir().expect("tempdir");
    let storage = CsvLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(
        storage.ledger_path("mixed"),
        "date,time,income,note\n2024-06-05,14:00,20.00,\n2024-06-05,15:00,twenty,\n",
    )
    .unwrap();

    let entries = storage.read_all("mixed").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].income, 20.0);
}

#[test]
fn append_repairs_missing_trailing_newline() {
    let dir = tempdir().expect("tempdir");
    let storage = CsvLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(
        storage.ledger_path("hand_edited"),
        "date,time,income,note\n2024-06-01,09:00,1.00,no newline",
    )
    .unwrap();

    storage
        .append("hand_edited", &Entry::new(day(2), None, 2.0, ""))
        .unwrap();

    let entries = storage.read_all("hand_edited").unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].note, "no newline");
    assert_eq!(entries[1].income, 2.0);
}

#[test]
fn names_with_one_file_share_a_storage_key() {
    let dir = tempdir().expect("tempdir");
    let storage = CsvLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");

    assert_eq!(storage.storage_key("cafe.1"), "cafe_1");
    assert_eq!(storage.storage_key("Cafe_1"), storage.storage_key("cafe.1"));
    assert_eq!(storage.ledger_path("cafe.1"), storage.ledger_path("Cafe_1"));
    assert_ne!(storage.storage_key("cafe1"), storage.storage_key("cafe_1"));
}

#[test]
fn unavailable_root_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, "occupied").unwrap();

    let result = CsvLedgerStorage::new(blocker.join("data"));
    assert!(matches!(result, Err(CoreError::Io(_))));
}
