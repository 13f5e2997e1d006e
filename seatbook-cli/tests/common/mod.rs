//! Common test utilities for CLI integration tests.

use assert_cmd::Command;
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the seatbook data directory (created on first use)
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("seatbook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with only the binary, for tests that control every flag.
    ///
    /// Runs from the temp directory so no project config from the source
    /// tree is picked up.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("seatbook").expect("Failed to find seatbook binary");
        cmd.current_dir(&self.temp_path)
            .env_remove("SEATBOOK_DATA_DIR")
            .env_remove("SEATBOOK_BUSY_TIMEOUT")
            .env_remove("SEATBOOK_DISABLE_AUTOINIT")
            .env_remove("SEATBOOK_MAXIMUM_LOCK_WAIT_SECONDS")
            .env_remove("SEATBOOK_OUTPUT_FORMAT")
            .env_remove("SEATBOOK_LOG_MODE");
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Path of the database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("seatbook.db")
    }

    /// Run a command that must succeed and return its trimmed stdout.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run seatbook");
        assert!(
            output.status.success(),
            "seatbook {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Book a party of `people` on `date` at `time` and return the id.
    pub fn book(&self, people: &str, date: NaiveDate, time: &str, mobile: &str) -> i64 {
        let date = date.to_string();
        self.run_ok(&[
            "book",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--mobile-number",
            mobile,
            "--people",
            people,
            "--date",
            &date,
            "--time",
            time,
        ])
        .parse()
        .expect("book did not print an id")
    }

    /// Add a table and return its id.
    pub fn add_table(&self, name: &str, capacity: u32) -> i64 {
        let capacity = capacity.to_string();
        self.run_ok(&["add-table", "--name", name, "--capacity", &capacity])
            .parse()
            .expect("add-table did not print an id")
    }

    /// Read the stdout of a `--format json` command as a JSON array.
    pub fn json(&self, args: &[&str]) -> Vec<serde_json::Value> {
        let mut full = args.to_vec();
        full.extend(["--format", "json"]);
        serde_json::from_str(&self.run_ok(&full)).expect("output is not JSON")
    }
}

/// The next day after today (UTC) on which the restaurant is open.
#[allow(dead_code)]
pub fn next_open_day() -> NaiveDate {
    let mut day = Utc::now().date_naive() + Duration::days(1);
    while day.weekday() == Weekday::Tue {
        day += Duration::days(1);
    }
    day
}

/// The next Tuesday after today (UTC).
#[allow(dead_code)]
pub fn next_tuesday() -> NaiveDate {
    let mut day = Utc::now().date_naive() + Duration::days(1);
    while day.weekday() != Weekday::Tue {
        day += Duration::days(1);
    }
    day
}
