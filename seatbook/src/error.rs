//! Error types for the seatbook library.
//!
//! Every failure the engine can report is a variant of [`Error`]. Validation
//! failures carry a [`ValidationError`]; precondition and state-machine
//! failures have their own variants. [`Error::kind`] flattens both into a
//! single [`ErrorKind`] so callers can branch on exactly one reported kind.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::reservation::{ReservationId, ReservationStatus};
use crate::table::TableId;
use crate::validation::ValidationError;

/// Result type alias for operations that may fail with a seatbook error.
///
/// # Examples
///
/// ```
/// use seatbook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the seatbook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A reservation or table payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The reservation is in a terminal state and cannot be changed.
    #[error("a {status} reservation cannot be updated")]
    TerminalStateViolation {
        /// The current (terminal) status.
        status: ReservationStatus,
    },

    /// The requested status change is not part of the state machine.
    #[error("reservation {id} cannot move from {from} to {to}")]
    ReservationStatusViolation {
        /// The reservation being changed.
        id: ReservationId,
        /// The status the reservation is currently in.
        from: ReservationStatus,
        /// The status that was requested.
        to: ReservationStatus,
    },

    /// No table exists with the given identifier.
    #[error("table {id} does not exist")]
    TableNotFound {
        /// The identifier that was looked up.
        id: TableId,
    },

    /// No reservation exists with the given identifier.
    #[error("reservation {id} does not exist")]
    ReservationNotFound {
        /// The identifier that was looked up.
        id: ReservationId,
    },

    /// The table already has an occupant.
    #[error("table {id} is occupied")]
    TableOccupied {
        /// The occupied table.
        id: TableId,
    },

    /// The table has no occupant to finish.
    #[error("table {id} is not occupied")]
    TableNotOccupied {
        /// The free table.
        id: TableId,
    },

    /// The party does not fit at the table.
    #[error("table capacity {capacity} is too small for a party of {people}")]
    CapacityExceeded {
        /// Size of the party.
        people: u32,
        /// Capacity of the table.
        capacity: u32,
    },

    /// A transactional write lost to a concurrent writer and was rolled back.
    #[error("write conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or environment setting has an invalid value.
    #[error("invalid setting '{field}': {message}")]
    InvalidSetting {
        /// The setting that failed validation.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration file could not be read.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The path that could not be read.
        path: PathBuf,
        /// The reason it could not be read.
        reason: String,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The schema version this build understands.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// The single kind reported for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The payload body was absent.
    MissingData,
    /// A required field was absent or malformed.
    MissingField,
    /// A transition-only status was submitted as data.
    InvalidState,
    /// The date is in the past.
    PastDate,
    /// The date falls on the closed weekday.
    ClosedDay,
    /// The time is outside business hours.
    OutsideHours,
    /// The status text is not a known status.
    UnknownStatus,
    /// The reservation is already in a terminal state.
    TerminalStateViolation,
    /// The table does not exist.
    TableNotFound,
    /// The reservation does not exist.
    ReservationNotFound,
    /// The table already has an occupant.
    TableOccupied,
    /// The table has no occupant.
    TableNotOccupied,
    /// The party is larger than the table.
    CapacityExceeded,
    /// The status change is not allowed from the current status.
    ReservationStatusViolation,
    /// A concurrent writer won and the transaction was rolled back.
    Conflict,
    /// The store failed for a reason other than a conflict.
    Database,
    /// Configuration could not be loaded or is invalid.
    Configuration,
    /// An I/O operation failed.
    Io,
}

impl ErrorKind {
    /// Returns the name of this kind as it appears in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingData => "MissingData",
            Self::MissingField => "MissingField",
            Self::InvalidState => "InvalidState",
            Self::PastDate => "PastDate",
            Self::ClosedDay => "ClosedDay",
            Self::OutsideHours => "OutsideHours",
            Self::UnknownStatus => "UnknownStatus",
            Self::TerminalStateViolation => "TerminalStateViolation",
            Self::TableNotFound => "TableNotFound",
            Self::ReservationNotFound => "ReservationNotFound",
            Self::TableOccupied => "TableOccupied",
            Self::TableNotOccupied => "TableNotOccupied",
            Self::CapacityExceeded => "CapacityExceeded",
            Self::ReservationStatusViolation => "ReservationStatusViolation",
            Self::Conflict => "Conflict",
            Self::Database => "Database",
            Self::Configuration => "Configuration",
            Self::Io => "Io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Returns the kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatbook::{Error, ErrorKind, TableId};
    ///
    /// let err = Error::TableOccupied { id: TableId::new(3) };
    /// assert_eq!(err.kind(), ErrorKind::TableOccupied);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(err) => err.kind(),
            Self::TerminalStateViolation { .. } => ErrorKind::TerminalStateViolation,
            Self::ReservationStatusViolation { .. } => ErrorKind::ReservationStatusViolation,
            Self::TableNotFound { .. } => ErrorKind::TableNotFound,
            Self::ReservationNotFound { .. } => ErrorKind::ReservationNotFound,
            Self::TableOccupied { .. } => ErrorKind::TableOccupied,
            Self::TableNotOccupied { .. } => ErrorKind::TableNotOccupied,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Database(_)
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::Database,
            Self::Configuration(_)
            | Self::InvalidSetting { .. }
            | Self::InvalidPath { .. }
            | Self::DataDirectoryNotFound { .. } => ErrorKind::Configuration,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether the failure was caused by the caller's request.
    ///
    /// Client faults are detected before any write is attempted, or by a
    /// conditional write that was rolled back, and are never retried.
    #[must_use]
    pub fn is_client_fault(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::Conflict | ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Io
        )
    }

    /// Whether the failure is a write conflict the caller may retry.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    /// Whether the failure names a missing table or reservation.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TableNotFound | ErrorKind::ReservationNotFound
        )
    }
}
