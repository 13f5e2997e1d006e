//! Common test utilities for integration tests.

use std::path::PathBuf;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use tempfile::TempDir;

use seatbook::{
    Database, DatabaseConfig, Engine, FixedClock, ReservationPayload, TablePayload,
};

/// A Wednesday, noon UTC.
#[allow(dead_code)]
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 2, 12, 0, 0).unwrap()
}

/// The day after [`now`], a Thursday.
#[allow(dead_code)]
pub fn tomorrow() -> NaiveDate {
    now().date_naive() + Duration::days(1)
}

/// The next day after today (wall clock) that is not a Tuesday.
#[allow(dead_code)]
pub fn next_open_day() -> NaiveDate {
    let mut day = Utc::now().date_naive() + Duration::days(1);
    while day.weekday() == Weekday::Tue {
        day += Duration::days(1);
    }
    day
}

/// A database file in a fresh temporary directory.
#[allow(dead_code)]
pub struct TestStore {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seatbook.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();
        Self { dir, path }
    }

    /// Opens another handle on the same file.
    #[allow(dead_code)]
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.path).existing_only()).unwrap()
    }

    /// An engine whose clock is pinned to [`now`].
    #[allow(dead_code)]
    pub fn engine(&self) -> Engine {
        Engine::with_clock(self.open(), Box::new(FixedClock::new(now())))
    }
}

#[allow(dead_code)]
pub fn booking(people: i64, date: NaiveDate, time: &str, mobile: &str) -> ReservationPayload {
    ReservationPayload {
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
        mobile_number: Some(mobile.into()),
        people: Some(people),
        reservation_date: Some(date.format("%Y-%m-%d").to_string()),
        reservation_time: Some(time.into()),
        status: None,
    }
}

#[allow(dead_code)]
pub fn table(name: &str, capacity: i64) -> TablePayload {
    TablePayload {
        table_name: Some(name.into()),
        capacity: Some(capacity),
    }
}
