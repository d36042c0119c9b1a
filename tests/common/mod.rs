#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use tally::Dashboard;
use tally_config::{ConfigManager, JsonTenantDirectory};
use tally_core::FixedClock;
use tally_storage_csv::CsvLedgerStorage;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const NOW: &str = "2024-05-10 09:30:00";

pub fn at(stamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").expect("parse timestamp")
}

/// Creates an isolated installation directory for one test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Wires a file-backed dashboard under `base` whose clock is frozen at `now`.
pub fn dashboard_at(base: &Path, now: &str) -> Dashboard {
    let manager = ConfigManager::with_base_dir(base.to_path_buf()).expect("create config manager");
    let tenants =
        JsonTenantDirectory::open(manager.tenants_path().to_path_buf()).expect("open registry");
    Dashboard::new(
        Box::new(ledger_storage(base)),
        Box::new(tenants),
        Box::new(FixedClock(at(now))),
    )
}

pub fn setup_test_env() -> (Dashboard, PathBuf) {
    let base = temp_base();
    let dashboard = dashboard_at(&base, NOW);
    (dashboard, base)
}

pub fn ledger_storage(base: &Path) -> CsvLedgerStorage {
    CsvLedgerStorage::new(base.join("data")).expect("create csv storage")
}
