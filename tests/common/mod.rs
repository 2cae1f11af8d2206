#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use kakeibo_core::{core::SampleSource, storage::JsonFileStorage, Kakeibo, LedgerEntry};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// A context over file storage in its own directory, fed by the sample source.
pub fn sample_app() -> (Kakeibo, PathBuf) {
    let path = temp_base().join("local_storage.json");
    let app = Kakeibo::new(JsonFileStorage::new(path.clone())).with_source(SampleSource);
    (app, path)
}

pub fn outgo(id: &str, date: &str, amount: f64) -> LedgerEntry {
    LedgerEntry::new(date, "Groceries", "食費")
        .with_id(id)
        .with_outgo(amount)
}
