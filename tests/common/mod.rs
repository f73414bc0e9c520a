//! Shared test fixtures for the value tracker integration tests.
//!
//! Provides `setup_tracker()` which opens a tracker on a temporary data
//! directory seeded with a small, fixed collection, plus a fixed `now()` so
//! every derived number is reproducible.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use value_tracker::{Item, NewItem, ValueTracker};

/// The instant all integration tests evaluate metrics at.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Route library logs to the test harness. Set `RUST_LOG=value_tracker=debug`
/// to see them.
pub fn init_logging() {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "warn");
    let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
}

/// Open a tracker backed by a temporary data directory with the sample
/// collection already stored.
///
/// Returns `(ValueTracker, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test so the data directory is
/// not deleted prematurely.
pub fn setup_tracker() -> (ValueTracker, tempfile::TempDir) {
    init_logging();
    let tmp_dir = tempfile::tempdir().unwrap();
    let tracker = ValueTracker::builder()
        .data_dir(tmp_dir.path())
        .seed(sample_items())
        .build()
        .unwrap();
    (tracker, tmp_dir)
}

/// Open a tracker on an empty temporary data directory.
pub fn setup_empty_tracker() -> (ValueTracker, tempfile::TempDir) {
    init_logging();
    let tmp_dir = tempfile::tempdir().unwrap();
    let tracker = ValueTracker::builder().data_dir(tmp_dir.path()).build().unwrap();
    (tracker, tmp_dir)
}

/// Four items bought at different times, in stored order:
///
/// | id          | price | bought     | days/wk | category    |
/// |-------------|-------|------------|---------|-------------|
/// | item-laptop | 1200  | 2024-01-02 | 7       | Electronics |
/// | item-bike   | 800   | 2022-01-01 | 2       | Sports      |
/// | item-mug    | 12    | 2024-12-22 | 7       | (none)      |
/// | item-phone  | 800   | 2023-07-01 | 7       | Electronics |
pub fn sample_items() -> Vec<Item> {
    let created = Utc.with_ymd_and_hms(2024, 12, 30, 9, 0, 0).unwrap();
    vec![
        NewItem::new("Laptop", 1200.0, date(2024, 1, 2))
            .category("Electronics")
            .expected_years(4.0)
            .into_item("item-laptop".into(), created),
        NewItem::new("bike", 800.0, date(2022, 1, 1))
            .category("Sports")
            .days_per_week(2.0)
            .notes("weekend rides")
            .into_item("item-bike".into(), created),
        NewItem::new("Mug", 12.0, date(2024, 12, 22)).into_item("item-mug".into(), created),
        NewItem::new("Phone", 800.0, date(2023, 7, 1))
            .category("Electronics")
            .expected_years(3.0)
            .into_item("item-phone".into(), created),
    ]
}

pub fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}
