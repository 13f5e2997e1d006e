//! Database schema definitions and SQL constants.

/// Current schema version, stored in the metadata table.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key/value store for schema bookkeeping.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Reservations.
///
/// `mobile_digits` holds the digits of `mobile_number` so phone search can
/// match on an indexed column. Times are stored as zero-padded `HH:MM`, which
/// keeps text ordering equal to chronological ordering.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        reservation_id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        mobile_number TEXT NOT NULL,
        mobile_digits TEXT NOT NULL,
        people INTEGER NOT NULL CHECK (people > 0),
        reservation_date TEXT NOT NULL,
        reservation_time TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'booked'
            CHECK (status IN ('booked', 'seated', 'finished', 'cancelled')),
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// Tables.
///
/// The UNIQUE constraint on `reservation_id` guarantees a reservation is
/// seated at no more than one table.
pub const CREATE_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS tables (
        table_id INTEGER PRIMARY KEY AUTOINCREMENT,
        table_name TEXT NOT NULL CHECK (length(table_name) > 1),
        capacity INTEGER NOT NULL CHECK (capacity > 0),
        reservation_id INTEGER UNIQUE REFERENCES reservations (reservation_id),
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// Date listing is filtered by date and ordered by time.
pub const CREATE_DATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_reservations_date \
     ON reservations(reservation_date, reservation_time)";

/// Phone search index.
pub const CREATE_DIGITS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_digits ON reservations(mobile_digits)";

/// Table listing is ordered by name.
pub const CREATE_TABLE_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tables_name ON tables(table_name)";

/// Reads the schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Writes the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
