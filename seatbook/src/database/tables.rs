//! Table queries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::reservation::ReservationId;
use crate::table::{Table, TableId};
use crate::validation::ValidatedTable;

use super::connection::Database;
use super::reservations::{from_unix_secs, to_unix_secs};

const TABLE_COLUMNS: &str = "table_id, table_name, capacity, reservation_id, created_at, updated_at";

const INSERT_TABLE: &str = r"
    INSERT INTO tables (table_name, capacity, reservation_id, created_at, updated_at)
    VALUES (?1, ?2, NULL, ?3, ?3)
";

const CLAIM_TABLE: &str = r"
    UPDATE tables
    SET reservation_id = ?1, updated_at = ?2
    WHERE table_id = ?3 AND reservation_id IS NULL
";

const RELEASE_TABLE: &str = r"
    UPDATE tables
    SET reservation_id = NULL, updated_at = ?1
    WHERE table_id = ?2 AND reservation_id = ?3
";

fn row_to_table(row: &Row<'_>) -> rusqlite::Result<Table> {
    Ok(Table {
        id: row.get(0)?,
        name: row.get(1)?,
        capacity: row.get(2)?,
        occupant: row.get(3)?,
        created_at: from_unix_secs(row.get(4)?, 4)?,
        updated_at: from_unix_secs(row.get(5)?, 5)?,
    })
}

impl Database {
    /// Inserts a free table and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_table(
        conn: &Connection,
        table: &ValidatedTable,
        now: DateTime<Utc>,
    ) -> Result<TableId> {
        conn.execute(
            INSERT_TABLE,
            params![table.name, table.capacity, to_unix_secs(now)],
        )?;
        Ok(TableId::new(conn.last_insert_rowid()))
    }

    /// Looks up a table by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_table(conn: &Connection, id: TableId) -> Result<Option<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM tables WHERE table_id = ?");
        Ok(conn.query_row(&sql, [id], row_to_table).optional()?)
    }

    /// Lists every table ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tables(conn: &Connection) -> Result<Vec<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM tables ORDER BY table_name, table_id");
        let mut stmt = conn.prepare(&sql)?;
        let tables = stmt
            .query_map([], row_to_table)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tables)
    }

    /// Returns the table `reservation` is seated at, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_table_by_occupant(
        conn: &Connection,
        reservation: ReservationId,
    ) -> Result<Option<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM tables WHERE reservation_id = ?");
        Ok(conn.query_row(&sql, [reservation], row_to_table).optional()?)
    }

    /// Records `reservation` as the occupant of `table`, but only if the
    /// table is free.
    ///
    /// Returns `false` when the table is missing or already occupied.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn claim_table(
        conn: &Connection,
        table: TableId,
        reservation: ReservationId,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let rows = conn.execute(CLAIM_TABLE, params![reservation, to_unix_secs(now), table])?;
        Ok(rows > 0)
    }

    /// Clears the occupant of `table`, but only if it is still `reservation`.
    ///
    /// Returns `false` when the table is missing or holds someone else.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn release_table(
        conn: &Connection,
        table: TableId,
        reservation: ReservationId,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let rows = conn.execute(RELEASE_TABLE, params![to_unix_secs(now), table, reservation])?;
        Ok(rows > 0)
    }
}
