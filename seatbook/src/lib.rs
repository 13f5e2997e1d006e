#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # seatbook
//!
//! A library for managing restaurant reservations and table assignments.
//!
//! The core of the library keeps two collections consistent: reservations,
//! whose status moves through a small state machine, and tables, which hold
//! at most one seated reservation at a time. Every write is planned first
//! and then applied in a single SQLite transaction.
//!
//! ## Core Types
//!
//! - [`Reservation`], [`ReservationId`] and [`ReservationStatus`]: bookings
//! - [`Table`] and [`TableId`]: seating units with a fixed capacity
//! - [`Engine`]: the facade exposing every operation
//! - [`Error`], [`ErrorKind`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use seatbook::validation::{normalize_phone, validate_business_hours};
//!
//! assert_eq!(normalize_phone("(555) 123-4567"), "5551234567");
//! assert!(validate_business_hours("18:00").is_ok());
//! assert!(validate_business_hours("21:31").is_err());
//! ```

pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod status;
pub mod table;
pub mod validation;

// Re-export key types at crate root for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    AssignmentCoordinator, CreateReservationPlan, CreateTablePlan, Engine, ExecutionResult,
    OperationPlan, PlanAction, PlanExecutor, StatusUpdatePlan, UpdateReservationPlan,
};
pub use reservation::{Reservation, ReservationId, ReservationStatus};
pub use table::{Table, TableId};
pub use validation::{ReservationPayload, TablePayload, ValidationError};
