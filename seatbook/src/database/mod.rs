//! Database layer for persistent storage of reservations and tables.
//!
//! The store is a single `SQLite` file in WAL mode. Query functions are
//! associated functions taking a `&Connection`, so the plan executor can run
//! them inside its transaction; reads outside a plan use
//! [`Database::connection`].
//!
//! # Examples
//!
//! ```no_run
//! use seatbook::database::{Database, DatabaseConfig};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
//! for table in Database::list_tables(db.connection()).unwrap() {
//!     println!("{} seats {}", table.name(), table.capacity());
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod reservations;
mod schema;
mod tables;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
