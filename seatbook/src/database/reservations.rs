//! Reservation queries.
//!
//! Every function takes a `&Connection` so it can run either on its own or
//! inside a transaction opened by the plan executor (a `Transaction`
//! dereferences to a `Connection`).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId, ReservationStatus};
use crate::validation::{normalize_phone, ValidatedFields};

use super::connection::Database;

const RESERVATION_COLUMNS: &str = "reservation_id, first_name, last_name, mobile_number, people, \
     reservation_date, reservation_time, status, created_at, updated_at";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (first_name, last_name, mobile_number, mobile_digits, people,
     reservation_date, reservation_time, status, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
";

const UPDATE_FIELDS: &str = r"
    UPDATE reservations
    SET first_name = ?1, last_name = ?2, mobile_number = ?3, mobile_digits = ?4,
        people = ?5, reservation_date = ?6, reservation_time = ?7, updated_at = ?8
    WHERE reservation_id = ?9
";

const UPDATE_STATUS_IF: &str = r"
    UPDATE reservations
    SET status = ?1, updated_at = ?2
    WHERE reservation_id = ?3 AND status = ?4
";

/// Converts a timestamp to whole seconds for storage.
pub(super) fn to_unix_secs(instant: DateTime<Utc>) -> i64 {
    instant.timestamp()
}

/// Converts stored seconds back to a timestamp.
pub(super) fn from_unix_secs(secs: i64, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(column, secs))
}

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

/// Expects the columns in [`RESERVATION_COLUMNS`] order.
fn row_to_reservation(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    let date: String = row.get(5)?;
    let time: String = row.get(6)?;

    Ok(Reservation {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        mobile_number: row.get(3)?,
        people: row.get(4)?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| conversion_error(5, e))?,
        time: NaiveTime::parse_from_str(&time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&time, "%H:%M:%S"))
            .map_err(|e| conversion_error(6, e))?,
        status: row.get(7)?,
        created_at: from_unix_secs(row.get(8)?, 8)?,
        updated_at: from_unix_secs(row.get(9)?, 9)?,
    })
}

impl Database {
    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_id = ?");
        let reservation = conn
            .query_row(&sql, [id], row_to_reservation)
            .optional()?;
        Ok(reservation)
    }

    /// Lists the reservations on `date` that are not `finished`, earliest
    /// time first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_by_date(conn: &Connection, date: NaiveDate) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE reservation_date = ? AND status <> 'finished' \
             ORDER BY reservation_time, reservation_id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map([date.format("%Y-%m-%d").to_string()], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Finds reservations whose mobile number contains the digits of `raw`.
    ///
    /// Formatting is ignored on both sides, so `(555) 123-4567` and
    /// `5551234567` find each other. A query without any digits matches
    /// nothing. Results are ordered by date, then time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_reservations_by_phone(conn: &Connection, raw: &str) -> Result<Vec<Reservation>> {
        let digits = normalize_phone(raw);
        if digits.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE mobile_digits LIKE '%' || ? || '%' \
             ORDER BY reservation_date, reservation_time, reservation_id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map([digits], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Inserts a reservation and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_reservation(
        conn: &Connection,
        fields: &ValidatedFields,
        status: ReservationStatus,
        now: DateTime<Utc>,
    ) -> Result<ReservationId> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                fields.first_name,
                fields.last_name,
                fields.mobile_number,
                normalize_phone(&fields.mobile_number),
                fields.people,
                fields.date.format("%Y-%m-%d").to_string(),
                fields.time_label(),
                status,
                to_unix_secs(now),
            ],
        )?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Overwrites the descriptive fields of a reservation. The status is
    /// left alone.
    ///
    /// Returns whether a row was updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_reservation_fields(
        conn: &Connection,
        id: ReservationId,
        fields: &ValidatedFields,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let rows = conn.execute(
            UPDATE_FIELDS,
            params![
                fields.first_name,
                fields.last_name,
                fields.mobile_number,
                normalize_phone(&fields.mobile_number),
                fields.people,
                fields.date.format("%Y-%m-%d").to_string(),
                fields.time_label(),
                to_unix_secs(now),
                id,
            ],
        )?;
        Ok(rows > 0)
    }

    /// Moves a reservation from `from` to `to`, but only if it is still in
    /// `from`.
    ///
    /// Returns `false` when no row matched, meaning the reservation is gone
    /// or a concurrent writer already changed its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_reservation_status_if(
        conn: &Connection,
        id: ReservationId,
        from: ReservationStatus,
        to: ReservationStatus,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let rows = conn.execute(UPDATE_STATUS_IF, params![to, to_unix_secs(now), id, from])?;
        Ok(rows > 0)
    }

    /// Counts stored reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails, or [`Error::DatabaseCorruption`]
    /// if the count comes back negative.
    pub fn count_reservations(conn: &Connection) -> Result<u64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM reservations", [], |row| row.get(0))?;
        row_count(count)
    }
}

fn row_count(count: i64) -> Result<u64> {
    u64::try_from(count).map_err(|_| Error::DatabaseCorruption {
        details: format!("negative row count: {count}"),
    })
}
