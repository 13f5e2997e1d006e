//! Shared test utilities for database unit tests.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::validation::ValidatedFields;

/// Creates a temporary test database that lives for the rest of the test run.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive; dropping the TempDir would delete the file
    std::mem::forget(dir);

    db
}

/// Builds validated reservation fields for a party of two.
///
/// # Panics
///
/// Panics if `date` is not `YYYY-MM-DD` or `time` is not `HH:MM[:SS]`.
#[must_use]
pub fn fields(date: &str, time: &str, mobile_number: &str) -> ValidatedFields {
    ValidatedFields {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        mobile_number: mobile_number.into(),
        people: 2,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        time: crate::validation::parse_time(time).unwrap(),
        status: None,
    }
}
